//! Independent state slices. Each slice owns its own entities and a single
//! loading/error pair; cross-slice reads live in `selectors`.

use crate::validation::LoginFormErrors;
use crate::{AuthInfo, AuthorizationStatus, City, Offer, OfferDetail, OfferId, RequestId, Review, SortType};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CityState {
    pub selected: City,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortingState {
    pub sort_type: SortType,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffersState {
    pub offers: Vec<Offer>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Bumped on every change to `offers`; memoised selectors key on it.
    pub revision: u64,
}

impl OffersState {
    pub(crate) fn start_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn loaded(&mut self, offers: Vec<Offer>) {
        self.offers = offers;
        self.is_loading = false;
        self.error = None;
        self.revision += 1;
    }

    /// Stale offers are kept so the list stays usable after a transient failure.
    pub(crate) fn failed(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    pub(crate) fn set_favorite_flag(&mut self, offer_id: &str, is_favorite: bool) {
        if set_flag(&mut self.offers, offer_id, is_favorite) {
            self.revision += 1;
        }
    }

    pub(crate) fn clear_favorite_flags(&mut self) {
        if clear_flags(&mut self.offers) {
            self.revision += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavoritesState {
    pub favorites: Vec<Offer>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl FavoritesState {
    pub(crate) fn start_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn loaded(&mut self, favorites: Vec<Offer>) {
        self.favorites = favorites;
        self.is_loading = false;
        self.error = None;
        self.revision += 1;
    }

    pub(crate) fn failed(&mut self, message: String) {
        self.is_loading = false;
        self.error = Some(message);
    }

    /// Applies the server's view of an offer after a favorite toggle.
    pub(crate) fn apply_toggled(&mut self, offer: Offer) {
        let index = self.favorites.iter().position(|fav| fav.id == offer.id);
        match (offer.is_favorite, index) {
            (true, Some(i)) => self.favorites[i] = offer,
            (true, None) => self.favorites.push(offer),
            (false, Some(i)) => {
                self.favorites.remove(i);
            }
            (false, None) => return,
        }
        self.error = None;
        self.revision += 1;
    }

    pub(crate) fn clear(&mut self) {
        if !self.favorites.is_empty() {
            self.favorites.clear();
            self.revision += 1;
        }
        self.is_loading = false;
        self.error = None;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OfferDetailState {
    /// Offer id the detail page is currently showing or loading.
    pub requested_id: Option<OfferId>,
    /// Token of the load cascade whose results may still land in state.
    pub current_request: Option<RequestId>,
    pub offer: Option<OfferDetail>,
    pub nearby_offers: Vec<Offer>,
    pub reviews: Vec<Review>,
    pub is_loading: bool,
    pub is_loading_nearby: bool,
    pub is_loading_reviews: bool,
    pub is_submitting_review: bool,
    pub not_found: bool,
    pub error: Option<String>,
    /// Network failure of the last review submission.
    pub review_error: Option<String>,
    /// Client-side validation message for the review form.
    pub review_form_error: Option<String>,
}

impl OfferDetailState {
    pub(crate) fn begin(&mut self, offer_id: OfferId, request: RequestId) {
        let same_offer = self.requested_id.as_deref() == Some(offer_id.as_str());
        if !same_offer {
            *self = Self::default();
        }
        self.requested_id = Some(offer_id);
        self.current_request = Some(request);
        self.is_loading = true;
        self.not_found = false;
        self.error = None;
    }

    pub(crate) fn is_current(&self, request: RequestId) -> bool {
        self.current_request == Some(request)
    }

    pub(crate) fn loaded(&mut self, offer: OfferDetail) {
        self.offer = Some(offer);
        self.is_loading = false;
        self.is_loading_nearby = true;
        self.is_loading_reviews = true;
    }

    pub(crate) fn failed(&mut self, message: String, not_found: bool) {
        if not_found {
            self.offer = None;
        }
        self.is_loading = false;
        self.not_found = not_found;
        self.error = Some(message);
    }

    pub(crate) fn nearby_loaded(&mut self, result: Result<Vec<Offer>, String>) {
        self.is_loading_nearby = false;
        match result {
            Ok(offers) => self.nearby_offers = offers,
            Err(message) => self.error = Some(message),
        }
    }

    pub(crate) fn reviews_loaded(&mut self, result: Result<Vec<Review>, String>) {
        self.is_loading_reviews = false;
        match result {
            Ok(reviews) => self.reviews = reviews,
            Err(message) => self.error = Some(message),
        }
    }

    pub(crate) fn start_review(&mut self) {
        self.is_submitting_review = true;
        self.review_error = None;
        self.review_form_error = None;
    }

    /// Newest reviews come first.
    pub(crate) fn review_added(&mut self, review: Review) {
        self.is_submitting_review = false;
        self.reviews.insert(0, review);
    }

    pub(crate) fn review_failed(&mut self, message: String) {
        self.is_submitting_review = false;
        self.review_error = Some(message);
    }

    pub(crate) fn set_favorite_flag(&mut self, offer_id: &str, is_favorite: bool) {
        if let Some(offer) = self.offer.as_mut().filter(|offer| offer.id == offer_id) {
            offer.is_favorite = is_favorite;
        }
        set_flag(&mut self.nearby_offers, offer_id, is_favorite);
    }

    pub(crate) fn clear_favorite_flags(&mut self) {
        if let Some(offer) = self.offer.as_mut() {
            offer.is_favorite = false;
        }
        clear_flags(&mut self.nearby_offers);
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub status: AuthorizationStatus,
    pub user: Option<AuthInfo>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub form_errors: LoginFormErrors,
}

impl AuthState {
    pub(crate) fn initialize(&mut self, token: Option<&str>) {
        self.status = match token {
            Some(token) if !token.is_empty() => AuthorizationStatus::Auth,
            _ => AuthorizationStatus::NoAuth,
        };
    }

    pub(crate) fn start_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.form_errors = LoginFormErrors::default();
    }

    pub(crate) fn logged_in(&mut self, info: AuthInfo) {
        self.status = AuthorizationStatus::Auth;
        self.user = Some(info);
        self.is_loading = false;
        self.error = None;
    }

    /// The server rejected the credential. Any error the failed request
    /// already recorded stays visible.
    pub(crate) fn expired(&mut self) {
        self.status = AuthorizationStatus::NoAuth;
        self.user = None;
        self.is_loading = false;
    }

    /// Every way out of a session ends unauthenticated; `error` records why, if anything failed.
    pub(crate) fn signed_out(&mut self, error: Option<String>) {
        self.status = AuthorizationStatus::NoAuth;
        self.user = None;
        self.is_loading = false;
        self.error = error;
    }
}

fn set_flag(offers: &mut [Offer], offer_id: &str, is_favorite: bool) -> bool {
    let mut changed = false;
    for offer in offers.iter_mut().filter(|offer| offer.id == offer_id) {
        if offer.is_favorite != is_favorite {
            offer.is_favorite = is_favorite;
            changed = true;
        }
    }
    changed
}

fn clear_flags(offers: &mut [Offer]) -> bool {
    let mut changed = false;
    for offer in offers.iter_mut().filter(|offer| offer.is_favorite) {
        offer.is_favorite = false;
        changed = true;
    }
    changed
}
