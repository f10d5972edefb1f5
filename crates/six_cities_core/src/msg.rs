use crate::{AuthInfo, Offer, OfferDetail, OfferId, RequestId, Review, Route, SortType};

/// Why an offer-detail fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferLoadError {
    NotFound,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Mount-time auth check against the persisted token. No network call.
    InitializeAuth { token: Option<String> },
    /// User picked a city tab.
    ChangeCity(String),
    /// User picked a sort option.
    SetSortType(SortType),
    /// User (or a redirect) asked for another page.
    Navigate(Route),
    /// User submitted the login form.
    Login { email: String, password: String },
    /// User clicked "Sign out".
    Logout,
    /// User clicked the bookmark button on an offer.
    ToggleFavorite { offer_id: OfferId },
    /// User submitted the review form for the offer being shown.
    SubmitReview { rating: u8, comment: String },
    /// Request the full offer list.
    LoadOffers,
    /// Request the favorites list; ignored while unauthorized.
    LoadFavorites,
    /// Start the detail cascade for an offer.
    LoadOffer(OfferId),
    /// Drop detail, nearby offers and reviews when leaving the offer page.
    ClearOffer,
    /// The server rejected the stored credential; the engine already dropped it.
    SessionExpired,
    /// Profile lookup for a stored token finished.
    AuthChecked(Result<AuthInfo, String>),
    LoginDone(Result<AuthInfo, String>),
    LogoutDone(Result<(), String>),
    OffersLoaded(Result<Vec<Offer>, String>),
    FavoritesLoaded(Result<Vec<Offer>, String>),
    OfferLoaded {
        request: RequestId,
        result: Result<OfferDetail, OfferLoadError>,
    },
    NearbyLoaded {
        request: RequestId,
        result: Result<Vec<Offer>, String>,
    },
    ReviewsLoaded {
        request: RequestId,
        result: Result<Vec<Review>, String>,
    },
    ReviewSubmitted {
        offer_id: OfferId,
        result: Result<Review, String>,
    },
    FavoriteToggled {
        offer_id: OfferId,
        result: Result<Offer, String>,
    },
}
