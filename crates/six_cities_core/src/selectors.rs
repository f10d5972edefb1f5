//! Pure derivations over `AppState`, plus a last-input memo cache for the
//! expensive ones.

use std::collections::BTreeMap;

use crate::{AppState, Offer, OfferDetail, Review, SortType};

pub type FavoritesByCity = BTreeMap<String, Vec<Offer>>;

pub fn offers_by_city(offers: &[Offer], city_name: &str) -> Vec<Offer> {
    offers
        .iter()
        .filter(|offer| offer.city.name == city_name)
        .cloned()
        .collect()
}

/// Orders offers for display. `Vec::sort_by` is stable, so equal keys keep
/// their relative order and re-sorting is idempotent.
pub fn sort_offers(mut offers: Vec<Offer>, sort_type: SortType) -> Vec<Offer> {
    match sort_type {
        SortType::Popular => {}
        SortType::PriceLow => offers.sort_by(|a, b| a.price.cmp(&b.price)),
        SortType::PriceHigh => offers.sort_by(|a, b| b.price.cmp(&a.price)),
        SortType::TopRated => offers.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    offers
}

/// Offers of the selected city in the selected order.
pub fn sorted_offers(state: &AppState) -> Vec<Offer> {
    sort_offers(
        offers_by_city(&state.offers().offers, &state.city().selected.name),
        state.sorting().sort_type,
    )
}

/// Groups favorites by city name. Cities without favorites get no entry.
pub fn favorites_grouped_by_city(favorites: &[Offer]) -> FavoritesByCity {
    let mut grouped = FavoritesByCity::new();
    for offer in favorites {
        grouped
            .entry(offer.city.name.clone())
            .or_default()
            .push(offer.clone());
    }
    grouped
}

pub fn favorites_count(state: &AppState) -> usize {
    state.favorites().favorites.len()
}

pub fn is_offer_favorite(state: &AppState, offer_id: &str) -> bool {
    state
        .favorites()
        .favorites
        .iter()
        .any(|fav| fav.id == offer_id)
}

pub fn is_authorized(state: &AppState) -> bool {
    state.is_authorized()
}

/// Everything the offer page needs, borrowed from the detail slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferPageData<'a> {
    pub offer: Option<&'a OfferDetail>,
    pub nearby_offers: &'a [Offer],
    pub reviews: &'a [Review],
    pub is_loading: bool,
    pub is_submitting_review: bool,
    pub error: Option<&'a str>,
    pub is_authorized: bool,
}

pub fn offer_page(state: &AppState) -> OfferPageData<'_> {
    let detail = state.offer_detail();
    OfferPageData {
        offer: detail.offer.as_ref(),
        nearby_offers: &detail.nearby_offers,
        reviews: &detail.reviews,
        is_loading: detail.is_loading,
        is_submitting_review: detail.is_submitting_review,
        error: detail.error.as_deref(),
        is_authorized: state.is_authorized(),
    }
}

/// Keeps the value computed for the last seen key.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computations: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.entry.as_ref().is_some_and(|(seen, _)| *seen != key) {
            self.entry = None;
        }
        let computations = &mut self.computations;
        &self
            .entry
            .get_or_insert_with(|| {
                *computations += 1;
                (key, compute())
            })
            .1
    }

    pub fn computations(&self) -> usize {
        self.computations
    }
}

type SortedKey = (u64, String, SortType);

/// Memoised selectors. Keys use slice revisions rather than whole collections.
#[derive(Debug, Clone, Default)]
pub struct SelectorCache {
    sorted: Memo<SortedKey, Vec<Offer>>,
    grouped: Memo<u64, FavoritesByCity>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted_offers(&mut self, state: &AppState) -> &[Offer] {
        let key = (
            state.offers().revision,
            state.city().selected.name.clone(),
            state.sorting().sort_type,
        );
        self.sorted.get_or_compute(key, || sorted_offers(state))
    }

    pub fn favorites_grouped_by_city(&mut self, state: &AppState) -> &FavoritesByCity {
        self.grouped.get_or_compute(state.favorites().revision, || {
            favorites_grouped_by_city(&state.favorites().favorites)
        })
    }

    /// Total number of times any memoised selector had to recompute.
    pub fn recomputations(&self) -> usize {
        self.sorted.computations() + self.grouped.computations()
    }
}
