use six_cities_logging::{sc_debug, sc_info, sc_warn};

use crate::validation::{validate_login, validate_review};
use crate::{AppState, City, Effect, FavoriteStatus, Msg, OfferDetailState, OfferLoadError, Route};

const OFFER_NOT_FOUND: &str = "Offer not found";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InitializeAuth { token } => {
            let auth = state.auth_mut();
            auth.initialize(token.as_deref());
            let authorized = state.is_authorized();
            state.reguard_route();
            if authorized {
                vec![Effect::CheckAuth]
            } else {
                Vec::new()
            }
        }
        Msg::ChangeCity(name) => {
            if state.city().selected.name == name {
                return (state, Vec::new());
            }
            match City::by_name(&name) {
                Some(city) => state.city_mut().selected = city,
                None => sc_warn!("Ignoring unknown city {:?}", name),
            }
            Vec::new()
        }
        Msg::SetSortType(sort_type) => {
            if state.sorting().sort_type != sort_type {
                state.sorting_mut().sort_type = sort_type;
            }
            Vec::new()
        }
        Msg::Navigate(route) => {
            state.set_route(route);
            Vec::new()
        }
        Msg::Login { email, password } => {
            if state.auth().is_loading {
                return (state, Vec::new());
            }
            if let Err(errors) = validate_login(&email, &password) {
                state.auth_mut().form_errors = errors;
                return (state, Vec::new());
            }
            state.auth_mut().start_loading();
            vec![Effect::Login { email, password }]
        }
        Msg::LoginDone(Ok(info)) => {
            sc_info!("Signed in as {}", info.email);
            state.auth_mut().logged_in(info);
            if *state.route() == Route::Login {
                state.set_route(Route::Main);
            }
            Vec::new()
        }
        Msg::LoginDone(Err(message)) => {
            state.auth_mut().signed_out(Some(message));
            Vec::new()
        }
        Msg::Logout => {
            state.auth_mut().start_loading();
            vec![Effect::Logout]
        }
        Msg::LogoutDone(result) => {
            state.auth_mut().signed_out(result.err());
            state.end_session();
            Vec::new()
        }
        Msg::SessionExpired => {
            sc_info!("Session expired; dropping to unauthorized");
            state.auth_mut().expired();
            state.end_session();
            Vec::new()
        }
        Msg::AuthChecked(Ok(info)) => {
            if state.is_authorized() {
                state.auth_mut().user = Some(info);
            }
            Vec::new()
        }
        Msg::AuthChecked(Err(message)) => {
            sc_warn!("Profile lookup failed: {}", message);
            Vec::new()
        }
        Msg::LoadOffers => {
            if state.offers().is_loading {
                return (state, Vec::new());
            }
            state.offers_mut().start_loading();
            vec![Effect::FetchOffers]
        }
        Msg::OffersLoaded(Ok(offers)) => {
            state.offers_mut().loaded(offers);
            Vec::new()
        }
        Msg::OffersLoaded(Err(message)) => {
            state.offers_mut().failed(message);
            Vec::new()
        }
        Msg::LoadFavorites => {
            if !state.is_authorized() || state.favorites().is_loading {
                return (state, Vec::new());
            }
            state.favorites_mut().start_loading();
            vec![Effect::FetchFavorites]
        }
        Msg::FavoritesLoaded(Ok(favorites)) => {
            state.favorites_mut().loaded(favorites);
            Vec::new()
        }
        Msg::FavoritesLoaded(Err(message)) => {
            state.favorites_mut().failed(message);
            Vec::new()
        }
        Msg::LoadOffer(offer_id) => {
            let request = state.next_request();
            state.offer_detail_mut().begin(offer_id.clone(), request);
            vec![Effect::FetchOffer { request, offer_id }]
        }
        Msg::OfferLoaded { request, result } => {
            if !state.offer_detail().is_current(request) {
                sc_debug!("Discarding stale offer response for request {}", request);
                return (state, Vec::new());
            }
            match result {
                Ok(offer) => {
                    let offer_id = offer.id.clone();
                    state.offer_detail_mut().loaded(offer);
                    vec![
                        Effect::FetchNearby {
                            request,
                            offer_id: offer_id.clone(),
                        },
                        Effect::FetchReviews { request, offer_id },
                    ]
                }
                Err(OfferLoadError::NotFound) => {
                    state
                        .offer_detail_mut()
                        .failed(OFFER_NOT_FOUND.to_string(), true);
                    state.set_route(Route::NotFound);
                    Vec::new()
                }
                Err(OfferLoadError::Failed(message)) => {
                    state.offer_detail_mut().failed(message, false);
                    Vec::new()
                }
            }
        }
        Msg::NearbyLoaded { request, result } => {
            if state.offer_detail().is_current(request) {
                state.offer_detail_mut().nearby_loaded(result);
            } else {
                sc_debug!("Discarding stale nearby offers for request {}", request);
            }
            Vec::new()
        }
        Msg::ReviewsLoaded { request, result } => {
            if state.offer_detail().is_current(request) {
                state.offer_detail_mut().reviews_loaded(result);
            } else {
                sc_debug!("Discarding stale reviews for request {}", request);
            }
            Vec::new()
        }
        Msg::ClearOffer => {
            if *state.offer_detail() != OfferDetailState::default() {
                state.offer_detail_mut().clear();
            }
            Vec::new()
        }
        Msg::SubmitReview { rating, comment } => {
            let detail = state.offer_detail();
            let target = match detail.offer.as_ref() {
                Some(offer) if !detail.is_submitting_review => Some(offer.id.clone()),
                _ => None,
            };
            let Some(offer_id) = target else {
                return (state, Vec::new());
            };
            if !state.is_authorized() {
                sc_warn!("Review submitted while unauthorized; ignoring");
                return (state, Vec::new());
            }
            if let Err(err) = validate_review(rating, &comment) {
                state.offer_detail_mut().review_form_error = Some(err.to_string());
                return (state, Vec::new());
            }
            state.offer_detail_mut().start_review();
            vec![Effect::SubmitReview {
                offer_id,
                rating,
                comment,
            }]
        }
        Msg::ReviewSubmitted { offer_id, result } => {
            if state.offer_detail().requested_id.as_deref() != Some(offer_id.as_str()) {
                sc_debug!("Review for {} landed after leaving the offer", offer_id);
                return (state, Vec::new());
            }
            match result {
                Ok(review) => state.offer_detail_mut().review_added(review),
                Err(message) => state.offer_detail_mut().review_failed(message),
            }
            Vec::new()
        }
        Msg::ToggleFavorite { offer_id } => {
            if !state.is_authorized() {
                state.set_route(Route::Login);
                return (state, Vec::new());
            }
            let Some(current) = state.favorite_flag(&offer_id) else {
                sc_warn!("Favorite toggle for unknown offer {}", offer_id);
                return (state, Vec::new());
            };
            state.favorites_mut().error = None;
            vec![Effect::ToggleFavorite {
                offer_id,
                status: FavoriteStatus::for_target(!current),
            }]
        }
        Msg::FavoriteToggled { offer_id, result } => {
            match result {
                Ok(offer) => state.apply_favorite(offer),
                Err(message) => {
                    sc_warn!("Favorite toggle for {} failed: {}", offer_id, message);
                    state.favorites_mut().error = Some(message);
                }
            }
            Vec::new()
        }
    };

    (state, effects)
}
