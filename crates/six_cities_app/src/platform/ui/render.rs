use std::fmt::Write;

use six_cities_core::{
    AppViewModel, AuthorizationStatus, OfferCard, OfferPageView, Route, SortType,
};

/// Renders the whole page for the current route as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    header(&mut out, view);
    match &view.route {
        Route::Main => main_page(&mut out, view),
        Route::Login => login_page(&mut out, view),
        Route::Favorites => favorites_page(&mut out, view),
        Route::Offer(id) => match &view.offer_page {
            Some(page) => offer_page(&mut out, id, page),
            None => out.push_str("Loading offer...\n"),
        },
        Route::NotFound => out.push_str("404. Page not found. Type `home` to go back.\n"),
    }
    out
}

fn header(out: &mut String, view: &AppViewModel) {
    let account = match (view.header.authorization, &view.header.user_email) {
        (AuthorizationStatus::Auth, Some(email)) => {
            format!("{email} | Favorites: {}", view.header.favorites_count)
        }
        (AuthorizationStatus::Auth, None) => {
            format!("Signed in | Favorites: {}", view.header.favorites_count)
        }
        (AuthorizationStatus::Unknown, _) => "Checking session...".to_string(),
        (AuthorizationStatus::NoAuth, _) => "Sign in".to_string(),
    };
    let _ = writeln!(out, "== Six Cities == {} == {}", view.route, account);
}

fn main_page(out: &mut String, view: &AppViewModel) {
    let tabs: Vec<String> = view
        .cities
        .iter()
        .map(|city| {
            if *city == view.selected_city {
                format!("[{city}]")
            } else {
                city.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));

    if let Some(error) = &view.offers_error {
        let _ = writeln!(out, "! {error}");
    }
    if view.offers_loading && view.offers.is_empty() {
        out.push_str("Loading offers...\n");
        return;
    }
    if view.offers.is_empty() {
        let _ = writeln!(
            out,
            "No places to stay available in {}.",
            view.selected_city
        );
        return;
    }

    let _ = writeln!(
        out,
        "{} places to stay in {} | Sort by: {}",
        view.offers.len(),
        view.selected_city,
        sort_menu(view.sort_type)
    );
    for card in &view.offers {
        card_line(out, card);
    }
}

fn sort_menu(selected: SortType) -> String {
    SortType::ALL
        .iter()
        .map(|sort| {
            if *sort == selected {
                format!("[{}]", sort.label())
            } else {
                sort.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn card_line(out: &mut String, card: &OfferCard) {
    let mut badges = String::new();
    if card.is_premium {
        badges.push_str(" [Premium]");
    }
    if card.capabilities.show_favorite_toggle && card.is_favorite {
        badges.push_str(" [Bookmarked]");
    }
    let _ = writeln!(
        out,
        "  {:>4}  EUR {:>4}/night  rating {:>3}%  {} ({}){}",
        card.id, card.price, card.rating_width_percent, card.title, card.kind, badges
    );
}

fn login_page(out: &mut String, view: &AppViewModel) {
    out.push_str("Sign in: login <email> <password>\n");
    if view.auth_loading {
        out.push_str("Signing in...\n");
    }
    if let Some(error) = &view.login_errors.email {
        let _ = writeln!(out, "! email: {error}");
    }
    if let Some(error) = &view.login_errors.password {
        let _ = writeln!(out, "! password: {error}");
    }
    if let Some(error) = &view.auth_error {
        let _ = writeln!(out, "! {error}");
    }
}

fn favorites_page(out: &mut String, view: &AppViewModel) {
    if let Some(error) = &view.favorites_error {
        let _ = writeln!(out, "! {error}");
    }
    if view.favorites_loading && view.favorites.is_empty() {
        out.push_str("Loading favorites...\n");
        return;
    }
    if view.favorites.is_empty() {
        out.push_str("Nothing yet saved. Bookmark offers with `fav <id>`.\n");
        return;
    }
    out.push_str("Saved listing\n");
    for group in &view.favorites {
        let _ = writeln!(out, "{}", group.city);
        for card in &group.cards {
            card_line(out, card);
        }
    }
}

fn offer_page(out: &mut String, id: &str, page: &OfferPageView) {
    if let Some(error) = &page.error {
        let _ = writeln!(out, "! {error}");
    }
    let Some(offer) = &page.offer else {
        if page.is_loading {
            let _ = writeln!(out, "Loading offer {id}...");
        }
        return;
    };

    let premium = if offer.is_premium { "Premium | " } else { "" };
    let bookmark = if offer.is_favorite { " [Bookmarked]" } else { "" };
    let _ = writeln!(out, "{premium}{}{bookmark}", offer.title);
    let _ = writeln!(
        out,
        "Rating {:.1} | {} | {} bedrooms | max {} adults | EUR {}/night",
        offer.rating, offer.kind, offer.bedrooms, offer.max_adults, offer.price
    );
    if !offer.goods.is_empty() {
        let _ = writeln!(out, "What's inside: {}", offer.goods.join(", "));
    }
    let pro = if offer.host.is_pro { " (Pro)" } else { "" };
    let _ = writeln!(out, "Host: {}{pro}", offer.host.name);
    let _ = writeln!(out, "{}", offer.description);

    let _ = writeln!(out, "Reviews: {}", page.reviews.len());
    for review in &page.reviews {
        let _ = writeln!(
            out,
            "  {} ({:.0}/5, {}): {}",
            review.user.name, review.rating, review.date, review.comment
        );
    }
    if page.can_review {
        if page.is_submitting_review {
            out.push_str("Posting review...\n");
        } else {
            out.push_str("Add yours: review <1-5> <comment>\n");
        }
        for error in [&page.review_form_error, &page.review_error].into_iter().flatten() {
            let _ = writeln!(out, "! {error}");
        }
    }

    if !page.nearby.is_empty() {
        out.push_str("Other places in the neighbourhood\n");
        for card in &page.nearby {
            card_line(out, card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use six_cities_core::{
        AuthInfo, City, Location, Msg, Offer, OfferLoadError, Store,
    };

    fn offer(id: &str, city: &str, price: u32) -> Offer {
        Offer {
            id: id.to_string(),
            title: format!("Place {id}"),
            kind: "room".to_string(),
            price,
            city: City::by_name(city).unwrap(),
            location: Location::default(),
            is_favorite: false,
            is_premium: id == "1",
            rating: 3.6,
            preview_image: String::new(),
        }
    }

    fn store_with_offers() -> Store {
        let mut store = Store::new();
        store.mount(None);
        store.dispatch(Msg::OffersLoaded(Ok(vec![
            offer("1", "Paris", 200),
            offer("2", "Paris", 90),
            offer("3", "Hamburg", 50),
        ])));
        store
    }

    #[test]
    fn main_page_lists_offers_for_the_selected_city() {
        let store = store_with_offers();
        let text = render(&store.state().view());

        assert!(text.contains("[Paris]"));
        assert!(text.contains("2 places to stay in Paris"));
        assert!(text.contains("[Popular]"));
        assert!(text.contains("Place 1"));
        assert!(text.contains("[Premium]"));
        assert!(text.contains("rating  80%"));
        assert!(!text.contains("Place 3"));
        assert!(text.contains("Sign in"));
    }

    #[test]
    fn empty_city_says_so() {
        let mut store = store_with_offers();
        store.dispatch(Msg::ChangeCity("Brussels".to_string()));
        let text = render(&store.state().view());
        assert!(text.contains("No places to stay available in Brussels."));
    }

    #[test]
    fn login_page_shows_validation_errors() {
        let mut store = store_with_offers();
        store.dispatch(Msg::Navigate(Route::Login));
        store.dispatch(Msg::Login {
            email: "nope".to_string(),
            password: "letters".to_string(),
        });
        let text = render(&store.state().view());
        assert!(text.contains("! email: Please enter a valid email address"));
        assert!(text.contains("! password: Password must contain at least one letter and one digit"));
    }

    #[test]
    fn header_shows_the_signed_in_user() {
        let mut store = Store::new();
        store.mount(Some("t1".to_string()));
        store.dispatch(Msg::AuthChecked(Ok(AuthInfo {
            email: "oliver@example.test".to_string(),
            token: "t1".to_string(),
            name: "Oliver".to_string(),
            avatar_url: String::new(),
            is_pro: false,
        })));
        let text = render(&store.state().view());
        assert!(text.contains("oliver@example.test | Favorites: 0"));
    }

    #[test]
    fn failed_offer_load_is_reported() {
        let mut store = store_with_offers();
        store.dispatch(Msg::Navigate(Route::Offer("9".to_string())));
        store.dispatch(Msg::OfferLoaded {
            request: 1,
            result: Err(OfferLoadError::Failed("Internal error".to_string())),
        });
        let text = render(&store.state().view());
        assert!(text.contains("! Internal error"));
    }
}
