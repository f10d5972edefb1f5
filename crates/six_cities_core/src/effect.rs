use crate::{FavoriteStatus, OfferId, RequestId};

/// Side effects requested by `update`; the app hands them to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CheckAuth,
    Login { email: String, password: String },
    Logout,
    FetchOffers,
    FetchFavorites,
    FetchOffer { request: RequestId, offer_id: OfferId },
    FetchNearby { request: RequestId, offer_id: OfferId },
    FetchReviews { request: RequestId, offer_id: OfferId },
    SubmitReview {
        offer_id: OfferId,
        rating: u8,
        comment: String,
    },
    ToggleFavorite {
        offer_id: OfferId,
        status: FavoriteStatus,
    },
}
