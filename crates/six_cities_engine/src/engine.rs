use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;

use six_cities_core::Effect;
use six_cities_logging::{sc_debug, sc_error};

use crate::{Api, ApiClient, ApiError, ApiSettings, EngineEvent, FailureKind, TokenStore};

/// Background executor: one thread owning a tokio runtime. Each effect runs
/// as its own task, so independent requests overlap.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Effect>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = ApiClient::new(settings, tokens)?;
        Self::with_api(Arc::new(client))
    }

    /// Starts the executor over any `Api`. Fails if the tokio runtime cannot
    /// be built, so callers never hold a handle nobody is serving.
    pub fn with_api(api: Arc<dyn Api>) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Runtime::new().map_err(|err| {
            sc_error!("Could not start the engine runtime: {}", err);
            ApiError::new(FailureKind::Runtime, err.to_string())
        })?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<Effect>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(effect) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_effect(api.as_ref(), effect, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn execute(&self, effect: Effect) {
        if let Err(mpsc::SendError(effect)) = self.cmd_tx.send(effect) {
            sc_error!("Engine thread is gone; dropping {}", redacted(&effect));
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }
}

async fn handle_effect(api: &dyn Api, effect: Effect, event_tx: mpsc::Sender<EngineEvent>) {
    sc_debug!("engine executing {}", redacted(&effect));
    let event = match effect {
        Effect::CheckAuth => EngineEvent::AuthChecked(api.check_auth().await),
        Effect::Login { email, password } => {
            EngineEvent::LoggedIn(api.login(&email, &password).await)
        }
        Effect::Logout => EngineEvent::LoggedOut(api.logout().await),
        Effect::FetchOffers => EngineEvent::OffersFetched(api.offers().await),
        Effect::FetchFavorites => EngineEvent::FavoritesFetched(api.favorites().await),
        Effect::FetchOffer { request, offer_id } => EngineEvent::OfferFetched {
            request,
            result: api.offer(&offer_id).await,
        },
        Effect::FetchNearby { request, offer_id } => EngineEvent::NearbyFetched {
            request,
            result: api.nearby(&offer_id).await,
        },
        Effect::FetchReviews { request, offer_id } => EngineEvent::ReviewsFetched {
            request,
            result: api.reviews(&offer_id).await,
        },
        Effect::SubmitReview {
            offer_id,
            rating,
            comment,
        } => {
            let result = api.post_review(&offer_id, rating, &comment).await;
            EngineEvent::ReviewPosted { offer_id, result }
        }
        Effect::ToggleFavorite { offer_id, status } => {
            let result = api.set_favorite(&offer_id, status).await;
            EngineEvent::FavoriteSet { offer_id, result }
        }
    };

    let unauthorized = event.error().is_some_and(ApiError::is_unauthorized);
    let _ = event_tx.send(event);
    if unauthorized {
        let _ = event_tx.send(EngineEvent::CredentialCleared);
    }
}

fn redacted(effect: &Effect) -> String {
    match effect {
        Effect::Login { email, .. } => format!("Login {{ email: {email:?} }}"),
        other => format!("{other:?}"),
    }
}
