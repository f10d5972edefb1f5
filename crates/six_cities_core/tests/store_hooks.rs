use std::sync::Once;

use six_cities_core::{
    update, AppState, AuthInfo, City, Effect, LoadHooks, Location, Msg, Offer, Route,
    SelectorCache, SortType, Store,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(six_cities_logging::initialize_for_tests);
}

fn offer(id: &str, city: &str, price: u32) -> Offer {
    Offer {
        id: id.to_string(),
        title: format!("Offer {id}"),
        kind: "house".to_string(),
        price,
        city: City {
            name: city.to_string(),
            location: Location::default(),
        },
        location: Location::default(),
        is_favorite: false,
        is_premium: false,
        rating: 4.2,
        preview_image: String::new(),
    }
}

fn profile() -> AuthInfo {
    AuthInfo {
        email: "a@b.com".to_string(),
        token: "t1".to_string(),
        name: "a".to_string(),
        avatar_url: String::new(),
        is_pro: false,
    }
}

#[test]
fn mount_without_token_loads_offers_only() {
    init_logging();
    let mut store = Store::new();

    let effects = store.mount(None);

    assert_eq!(effects, vec![Effect::FetchOffers]);
    assert!(!store.state().is_authorized());
}

#[test]
fn mount_with_token_loads_profile_offers_and_favorites() {
    init_logging();
    let mut store = Store::new();

    let effects = store.mount(Some("t1".to_string()));

    assert_eq!(
        effects,
        vec![Effect::CheckAuth, Effect::FetchOffers, Effect::FetchFavorites]
    );
}

#[test]
fn mount_runs_once() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);
    assert!(store.mount(None).is_empty());
}

#[test]
fn hooks_wait_for_mount() {
    init_logging();
    let mut store = Store::new();
    let effects = store.dispatch(Msg::SetSortType(SortType::TopRated));
    assert!(effects.is_empty());
}

#[test]
fn offers_hook_does_not_refire_on_unrelated_changes() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);
    store.dispatch(Msg::OffersLoaded(Ok(vec![offer("1", "Paris", 10)])));

    assert!(store.dispatch(Msg::ChangeCity("Hamburg".to_string())).is_empty());
    assert!(store.dispatch(Msg::SetSortType(SortType::PriceHigh)).is_empty());
}

#[test]
fn failed_initial_load_is_not_retried_in_a_loop() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);

    let effects = store.dispatch(Msg::OffersLoaded(Err("Network Error".to_string())));

    assert!(effects.is_empty());
    assert_eq!(
        store.state().offers().error.as_deref(),
        Some("Network Error")
    );
}

#[test]
fn favorites_hook_fires_when_login_succeeds() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);

    let effects = store.dispatch(Msg::Login {
        email: "a@b.com".to_string(),
        password: "pass1".to_string(),
    });
    assert_eq!(
        effects,
        vec![Effect::Login {
            email: "a@b.com".to_string(),
            password: "pass1".to_string(),
        }]
    );

    let effects = store.dispatch(Msg::LoginDone(Ok(profile())));
    assert_eq!(effects, vec![Effect::FetchFavorites]);

    // Staying authorized does not fetch again.
    assert!(store.dispatch(Msg::SetSortType(SortType::PriceLow)).is_empty());
}

#[test]
fn favorites_hook_never_fires_while_unauthorized() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);
    let effects = store.dispatch(Msg::LoginDone(Err("nope".to_string())));
    assert!(effects.is_empty());
}

#[test]
fn navigating_to_offer_runs_detail_cascade() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);

    let effects = store.dispatch(Msg::Navigate(Route::Offer("7".to_string())));
    assert_eq!(
        effects,
        vec![Effect::FetchOffer {
            request: 1,
            offer_id: "7".to_string(),
        }]
    );

    // Same route again: nothing new.
    assert!(store
        .dispatch(Msg::Navigate(Route::Offer("7".to_string())))
        .is_empty());

    let effects = store.dispatch(Msg::Navigate(Route::Offer("8".to_string())));
    assert_eq!(
        effects,
        vec![Effect::FetchOffer {
            request: 2,
            offer_id: "8".to_string(),
        }]
    );
    assert_eq!(store.state().offer_detail().requested_id.as_deref(), Some("8"));
}

#[test]
fn leaving_offer_page_clears_detail() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);
    store.dispatch(Msg::Navigate(Route::Offer("7".to_string())));
    assert!(store.state().offer_detail().requested_id.is_some());

    store.dispatch(Msg::Navigate(Route::Main));

    assert!(store.state().offer_detail().requested_id.is_none());
    assert!(store.state().offer_detail().current_request.is_none());
}

#[test]
fn dirty_flag_tracks_changes() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);
    assert!(store.consume_dirty());
    assert!(!store.consume_dirty());

    store.dispatch(Msg::SetSortType(SortType::Popular));
    assert!(!store.consume_dirty());

    store.dispatch(Msg::SetSortType(SortType::TopRated));
    assert!(store.consume_dirty());
}

#[test]
fn selector_cache_recomputes_only_on_relevant_changes() {
    init_logging();
    let mut store = Store::new();
    store.mount(None);
    store.dispatch(Msg::OffersLoaded(Ok(vec![
        offer("1", "Paris", 30),
        offer("2", "Paris", 20),
        offer("3", "Cologne", 10),
    ])));
    let mut cache = SelectorCache::new();

    assert_eq!(cache.sorted_offers(store.state()).len(), 2);
    assert_eq!(cache.recomputations(), 1);

    // An unrelated change keeps the cached result.
    store.dispatch(Msg::Navigate(Route::Login));
    cache.sorted_offers(store.state());
    assert_eq!(cache.recomputations(), 1);

    store.dispatch(Msg::SetSortType(SortType::PriceLow));
    let ids: Vec<_> = cache
        .sorted_offers(store.state())
        .iter()
        .map(|o| o.id.clone())
        .collect();
    assert_eq!(ids, vec!["2", "1"]);
    assert_eq!(cache.recomputations(), 2);

    store.dispatch(Msg::ChangeCity("Cologne".to_string()));
    assert_eq!(cache.sorted_offers(store.state()).len(), 1);
    assert_eq!(cache.recomputations(), 3);
}

#[test]
fn view_model_uses_one_card_shape() {
    init_logging();
    let mut store = Store::new();
    store.mount(Some("t1".to_string()));
    store.dispatch(Msg::OffersLoaded(Ok(vec![offer("1", "Paris", 30)])));
    store.dispatch(Msg::FavoritesLoaded(Ok(vec![offer("1", "Paris", 30)])));
    store.dispatch(Msg::AuthChecked(Ok(profile())));

    let view = store.state().view();

    assert_eq!(view.header.user_email.as_deref(), Some("a@b.com"));
    assert_eq!(view.header.favorites_count, 1);
    assert_eq!(view.selected_city, "Paris");
    assert_eq!(view.offers.len(), 1);
    assert!(view.offers[0].capabilities.hover_highlight);
    assert_eq!(view.offers[0].rating_width_percent, 80);
    assert_eq!(view.favorites.len(), 1);
    assert_eq!(view.favorites[0].city, "Paris");
    assert!(!view.favorites[0].cards[0].capabilities.hover_highlight);
    assert!(view.favorites[0].cards[0].capabilities.show_favorite_toggle);
    assert!(view.offer_page.is_none());
}

#[test]
fn offers_hook_waits_while_a_load_is_in_flight() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadOffers);
    assert!(state.offers().is_loading);

    let mut hooks = LoadHooks::new();
    hooks.mount(None);
    assert!(!hooks.run(&state).contains(&Msg::LoadOffers));
}

#[test]
fn offers_hook_stays_quiet_after_a_failed_load() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoadOffers);
    let (state, _) = update(state, Msg::OffersLoaded(Err("Network Error".to_string())));
    assert!(state.offers().error.is_some());

    let mut hooks = LoadHooks::new();
    hooks.mount(None);
    assert!(!hooks.run(&state).contains(&Msg::LoadOffers));
}

#[test]
fn offers_hook_fires_for_an_idle_empty_collection() {
    init_logging();
    let mut hooks = LoadHooks::new();
    hooks.mount(None);
    assert!(hooks.run(&AppState::new()).contains(&Msg::LoadOffers));
}
