//! Data-loading coordinators. Each hook remembers the dependency it last saw
//! and only dispatches when that dependency changes, never on every render.

use crate::{AppState, Msg, OfferId};

#[derive(Debug, Clone, Default)]
pub struct LoadHooks {
    mounted: bool,
    last_offer_count: Option<usize>,
    last_authorized: Option<bool>,
    last_offer_route: Option<OfferId>,
}

impl LoadHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Auth-initialize hook: runs exactly once, on mount.
    pub fn mount(&mut self, persisted_token: Option<String>) -> Vec<Msg> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        vec![Msg::InitializeAuth {
            token: persisted_token,
        }]
    }

    /// Evaluates the remaining hooks against the latest state.
    pub fn run(&mut self, state: &AppState) -> Vec<Msg> {
        if !self.mounted {
            return Vec::new();
        }
        let mut msgs = Vec::new();
        self.offers_hook(state, &mut msgs);
        self.favorites_hook(state, &mut msgs);
        self.offer_detail_hook(state, &mut msgs);
        msgs
    }

    /// Fires when the collection becomes empty, unless a load is already in
    /// flight or the last one failed.
    fn offers_hook(&mut self, state: &AppState, msgs: &mut Vec<Msg>) {
        let offers = state.offers();
        let count = offers.offers.len();
        if self.last_offer_count == Some(count) {
            return;
        }
        self.last_offer_count = Some(count);
        if count == 0 && !offers.is_loading && offers.error.is_none() {
            msgs.push(Msg::LoadOffers);
        }
    }

    fn favorites_hook(&mut self, state: &AppState, msgs: &mut Vec<Msg>) {
        let authorized = state.is_authorized();
        if self.last_authorized == Some(authorized) {
            return;
        }
        self.last_authorized = Some(authorized);
        if authorized {
            msgs.push(Msg::LoadFavorites);
        }
    }

    fn offer_detail_hook(&mut self, state: &AppState, msgs: &mut Vec<Msg>) {
        let requested = state.route().offer_id();
        if self.last_offer_route.as_deref() == requested {
            return;
        }
        self.last_offer_route = requested.map(ToOwned::to_owned);
        match requested {
            Some(offer_id) => msgs.push(Msg::LoadOffer(offer_id.to_owned())),
            None => msgs.push(Msg::ClearOffer),
        }
    }
}
