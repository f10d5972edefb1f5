use crate::slices::{
    AuthState, CityState, FavoritesState, OfferDetailState, OffersState, SortingState,
};
use crate::{AuthorizationStatus, Offer, RequestId, Route};

/// The whole client state. Slices are only reachable mutably from inside the
/// crate, and any mutable access marks the state dirty for re-rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    city: CityState,
    sorting: SortingState,
    offers: OffersState,
    offer_detail: OfferDetailState,
    favorites: FavoritesState,
    auth: AuthState,
    route: Route,
    last_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(&self) -> &CityState {
        &self.city
    }

    pub fn sorting(&self) -> &SortingState {
        &self.sorting
    }

    pub fn offers(&self) -> &OffersState {
        &self.offers
    }

    pub fn offer_detail(&self) -> &OfferDetailState {
        &self.offer_detail
    }

    pub fn favorites(&self) -> &FavoritesState {
        &self.favorites
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_authorized(&self) -> bool {
        self.auth.status == AuthorizationStatus::Auth
    }

    /// Returns and clears the "needs re-render" flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn city_mut(&mut self) -> &mut CityState {
        self.dirty = true;
        &mut self.city
    }

    pub(crate) fn sorting_mut(&mut self) -> &mut SortingState {
        self.dirty = true;
        &mut self.sorting
    }

    pub(crate) fn offers_mut(&mut self) -> &mut OffersState {
        self.dirty = true;
        &mut self.offers
    }

    pub(crate) fn offer_detail_mut(&mut self) -> &mut OfferDetailState {
        self.dirty = true;
        &mut self.offer_detail
    }

    pub(crate) fn favorites_mut(&mut self) -> &mut FavoritesState {
        self.dirty = true;
        &mut self.favorites
    }

    pub(crate) fn auth_mut(&mut self) -> &mut AuthState {
        self.dirty = true;
        &mut self.auth
    }

    /// Navigates, applying the auth guard.
    pub(crate) fn set_route(&mut self, route: Route) {
        let route = route.guarded(self.auth.status);
        if route != self.route {
            self.route = route;
            self.dirty = true;
        }
    }

    /// Re-applies the guard after the auth status changed.
    pub(crate) fn reguard_route(&mut self) {
        let current = self.route.clone();
        self.set_route(current);
    }

    pub(crate) fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    /// Current favorite flag of an offer, looked up in whichever slice holds it.
    pub(crate) fn favorite_flag(&self, offer_id: &str) -> Option<bool> {
        let detail = self
            .offer_detail
            .offer
            .as_ref()
            .filter(|offer| offer.id == offer_id)
            .map(|offer| offer.is_favorite);
        detail
            .or_else(|| find_flag(&self.offers.offers, offer_id))
            .or_else(|| find_flag(&self.offer_detail.nearby_offers, offer_id))
            .or_else(|| find_flag(&self.favorites.favorites, offer_id))
    }

    /// Drops everything tied to the signed-in user: the favorites list and the
    /// bookmark flags on cached offers. Re-applies the route guard.
    pub(crate) fn end_session(&mut self) {
        self.favorites_mut().clear();
        self.offers_mut().clear_favorite_flags();
        self.offer_detail_mut().clear_favorite_flags();
        self.reguard_route();
    }

    /// Writes the server's answer to a favorite toggle into every slice.
    pub(crate) fn apply_favorite(&mut self, offer: Offer) {
        let flag = offer.is_favorite;
        self.offers_mut().set_favorite_flag(&offer.id, flag);
        self.offer_detail_mut().set_favorite_flag(&offer.id, flag);
        self.favorites_mut().apply_toggled(offer);
    }
}

fn find_flag(offers: &[Offer], offer_id: &str) -> Option<bool> {
    offers
        .iter()
        .find(|offer| offer.id == offer_id)
        .map(|offer| offer.is_favorite)
}
