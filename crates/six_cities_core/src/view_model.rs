use crate::selectors::{favorites_count, SelectorCache};
use crate::validation::LoginFormErrors;
use crate::{AppState, AuthorizationStatus, Offer, OfferDetail, Review, Route, SortType, CITY_NAMES};

/// Where a card is rendered; decides which interactions it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardContext {
    CityList,
    Nearby,
    Favorites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCapabilities {
    pub show_favorite_toggle: bool,
    /// Hovering the card highlights its marker on the map.
    pub hover_highlight: bool,
}

impl CardContext {
    pub fn capabilities(self) -> CardCapabilities {
        match self {
            CardContext::CityList => CardCapabilities {
                show_favorite_toggle: true,
                hover_highlight: true,
            },
            CardContext::Nearby | CardContext::Favorites => CardCapabilities {
                show_favorite_toggle: true,
                hover_highlight: false,
            },
        }
    }
}

/// The one offer card shape used by every list on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferCard {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub price: u32,
    pub rating: f64,
    /// Star bar width: the rating rounded to whole stars, as a percentage.
    pub rating_width_percent: u8,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub preview_image: String,
    pub capabilities: CardCapabilities,
}

impl OfferCard {
    pub fn from_offer(offer: &Offer, context: CardContext) -> Self {
        Self {
            id: offer.id.clone(),
            title: offer.title.clone(),
            kind: offer.kind.clone(),
            price: offer.price,
            rating: offer.rating,
            rating_width_percent: rating_width_percent(offer.rating),
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            preview_image: offer.preview_image.clone(),
            capabilities: context.capabilities(),
        }
    }
}

pub fn rating_width_percent(rating: f64) -> u8 {
    let stars = rating.round().clamp(0.0, 5.0) as u8;
    stars * 20
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderView {
    pub authorization: AuthorizationStatus,
    pub user_email: Option<String>,
    pub favorites_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferPageView {
    pub offer: Option<OfferDetail>,
    pub reviews: Vec<Review>,
    pub nearby: Vec<OfferCard>,
    pub is_loading: bool,
    pub is_submitting_review: bool,
    pub error: Option<String>,
    pub review_error: Option<String>,
    pub review_form_error: Option<String>,
    pub can_review: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesGroupView {
    pub city: String,
    pub cards: Vec<OfferCard>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub header: HeaderView,
    pub cities: Vec<&'static str>,
    pub selected_city: String,
    pub sort_type: SortType,
    pub offers: Vec<OfferCard>,
    pub offers_loading: bool,
    pub offers_error: Option<String>,
    pub offer_page: Option<OfferPageView>,
    pub favorites: Vec<FavoritesGroupView>,
    pub favorites_loading: bool,
    pub favorites_error: Option<String>,
    pub auth_loading: bool,
    pub auth_error: Option<String>,
    pub login_errors: LoginFormErrors,
}

impl AppViewModel {
    pub fn build(state: &AppState, cache: &mut SelectorCache) -> Self {
        let auth = state.auth();
        let header = HeaderView {
            authorization: auth.status,
            user_email: auth.user.as_ref().map(|user| user.email.clone()),
            favorites_count: favorites_count(state),
        };

        let offers = cache
            .sorted_offers(state)
            .iter()
            .map(|offer| OfferCard::from_offer(offer, CardContext::CityList))
            .collect();

        let favorites = cache
            .favorites_grouped_by_city(state)
            .iter()
            .map(|(city, group)| FavoritesGroupView {
                city: city.clone(),
                cards: group
                    .iter()
                    .map(|offer| OfferCard::from_offer(offer, CardContext::Favorites))
                    .collect(),
            })
            .collect();

        let offer_page = state.route().offer_id().map(|_| offer_page_view(state));

        Self {
            route: state.route().clone(),
            header,
            cities: CITY_NAMES.to_vec(),
            selected_city: state.city().selected.name.clone(),
            sort_type: state.sorting().sort_type,
            offers,
            offers_loading: state.offers().is_loading,
            offers_error: state.offers().error.clone(),
            offer_page,
            favorites,
            favorites_loading: state.favorites().is_loading,
            favorites_error: state.favorites().error.clone(),
            auth_loading: auth.is_loading,
            auth_error: auth.error.clone(),
            login_errors: auth.form_errors.clone(),
        }
    }
}

fn offer_page_view(state: &AppState) -> OfferPageView {
    let detail = state.offer_detail();
    OfferPageView {
        offer: detail.offer.clone(),
        reviews: detail.reviews.clone(),
        nearby: detail
            .nearby_offers
            .iter()
            .map(|offer| OfferCard::from_offer(offer, CardContext::Nearby))
            .collect(),
        is_loading: detail.is_loading,
        is_submitting_review: detail.is_submitting_review,
        error: detail.error.clone(),
        review_error: detail.review_error.clone(),
        review_form_error: detail.review_form_error.clone(),
        can_review: state.is_authorized(),
    }
}

impl AppState {
    /// Builds a view without memoisation; the app keeps a `SelectorCache` instead.
    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self, &mut SelectorCache::new())
    }
}
