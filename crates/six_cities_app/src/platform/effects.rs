use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use six_cities_core::{Effect, Msg, OfferLoadError};
use six_cities_engine::{
    ApiError, ApiSettings, EngineEvent, EngineHandle, FailureKind, TokenStore,
};
use six_cities_logging::{sc_info, sc_warn};

use super::app::Inbound;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ApiSettings,
        tokens: Arc<dyn TokenStore>,
        inbound: mpsc::Sender<Inbound>,
    ) -> Result<Self, ApiError> {
        let engine = EngineHandle::new(settings, tokens)?;
        let runner = Self { engine };
        runner.spawn_event_loop(inbound);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match &effect {
                Effect::Login { email, .. } => sc_info!("Login email={}", email),
                Effect::SubmitReview {
                    offer_id, rating, ..
                } => sc_info!("SubmitReview offer={} rating={}", offer_id, rating),
                other => sc_info!("{:?}", other),
            }
            self.engine.execute(effect);
        }
    }

    fn spawn_event_loop(&self, inbound: mpsc::Sender<Inbound>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.try_recv() {
                Some(event) => {
                    if inbound.send(Inbound::Msg(map_event(event))).is_err() {
                        break;
                    }
                }
                None => thread::sleep(Duration::from_millis(20)),
            }
        });
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AuthChecked(result) => Msg::AuthChecked(result.map_err(describe)),
        EngineEvent::LoggedIn(result) => Msg::LoginDone(result.map_err(describe)),
        EngineEvent::LoggedOut(result) => Msg::LogoutDone(result.map_err(describe)),
        EngineEvent::OffersFetched(result) => Msg::OffersLoaded(result.map_err(describe)),
        EngineEvent::FavoritesFetched(result) => Msg::FavoritesLoaded(result.map_err(describe)),
        EngineEvent::OfferFetched { request, result } => Msg::OfferLoaded {
            request,
            result: result.map_err(|err| match err.kind {
                FailureKind::NotFound => OfferLoadError::NotFound,
                _ => OfferLoadError::Failed(describe(err)),
            }),
        },
        EngineEvent::NearbyFetched { request, result } => Msg::NearbyLoaded {
            request,
            result: result.map_err(describe),
        },
        EngineEvent::ReviewsFetched { request, result } => Msg::ReviewsLoaded {
            request,
            result: result.map_err(describe),
        },
        EngineEvent::ReviewPosted { offer_id, result } => Msg::ReviewSubmitted {
            offer_id,
            result: result.map_err(describe),
        },
        EngineEvent::FavoriteSet { offer_id, result } => Msg::FavoriteToggled {
            offer_id,
            result: result.map_err(describe),
        },
        EngineEvent::CredentialCleared => Msg::SessionExpired,
    }
}

/// User-facing text for a failed request: the server's message when it sent one.
fn describe(err: ApiError) -> String {
    sc_warn!("Request failed: {}", err);
    if err.message.is_empty() {
        err.kind.to_string()
    } else {
        err.message
    }
}
