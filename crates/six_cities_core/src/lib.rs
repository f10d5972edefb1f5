//! Six Cities core: pure state machine, selectors and view-model helpers.
mod effect;
mod hooks;
mod msg;
mod route;
pub mod selectors;
mod slices;
mod state;
mod store;
mod types;
mod update;
pub mod validation;
mod view_model;

pub use effect::Effect;
pub use hooks::LoadHooks;
pub use msg::{Msg, OfferLoadError};
pub use route::Route;
pub use selectors::SelectorCache;
pub use slices::{
    AuthState, CityState, FavoritesState, OfferDetailState, OffersState, SortingState,
};
pub use state::AppState;
pub use store::Store;
pub use types::{
    AuthInfo, AuthorizationStatus, City, FavoriteStatus, Host, Location, Offer, OfferDetail,
    OfferId, RequestId, Review, ReviewUser, SortType, CITY_NAMES, DEFAULT_CITY,
};
pub use update::update;
pub use view_model::{
    rating_width_percent, AppViewModel, CardCapabilities, CardContext, FavoritesGroupView,
    HeaderView, OfferCard, OfferPageView,
};
