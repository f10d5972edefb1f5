use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use six_cities_core::FavoriteStatus;
use six_cities_engine::{Api, ApiClient, ApiSettings, FailureKind, MemoryTokenStore, TokenStore};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn offer_json(id: &str, is_favorite: bool) -> Value {
    json!({
        "id": id,
        "title": "Canal View",
        "type": "apartment",
        "price": 120,
        "city": {
            "name": "Amsterdam",
            "location": { "latitude": 52.37454, "longitude": 4.897976, "zoom": 13 }
        },
        "location": { "latitude": 52.3609553943508, "longitude": 4.85309666406198, "zoom": 16 },
        "isFavorite": is_favorite,
        "isPremium": false,
        "rating": 4.2,
        "previewImage": "https://example.test/preview.jpg"
    })
}

fn auth_json(token: &str) -> Value {
    json!({
        "email": "oliver@example.test",
        "token": token,
        "name": "Oliver",
        "avatarUrl": "https://example.test/avatar.jpg",
        "isPro": false
    })
}

fn review_json(id: &str) -> Value {
    json!({
        "id": id,
        "user": { "name": "Max", "avatarUrl": "https://example.test/max.jpg", "isPro": true },
        "rating": 4,
        "comment": "Quiet neighbourhood, friendly host, the bed could have been a bit bigger.",
        "date": "2019-05-08T14:13:56.569Z"
    })
}

fn client(server: &MockServer, store: Arc<MemoryTokenStore>) -> ApiClient {
    let settings = ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    };
    ApiClient::new(settings, store).unwrap()
}

#[tokio::test]
async fn login_persists_returned_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "email": "oliver@example.test", "password": "abc1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_json("t1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/favorite"))
        .and(header("X-Token", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let api = client(&server, store.clone());

    let info = api.login("oliver@example.test", "abc1").await.unwrap();
    assert_eq!(info.token, "t1");
    assert_eq!(store.load().unwrap().as_deref(), Some("t1"));
    assert_eq!(api.credential().as_deref(), Some("t1"));

    let favorites = api.favorites().await.unwrap();
    assert!(favorites.is_empty());
}

#[tokio::test]
async fn rejected_login_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Validation error" })),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let api = client(&server, store.clone());

    let err = api.login("oliver@example.test", "abc1").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "Validation error");
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_drops_credential_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token("t1"));
    let api = client(&server, store.clone());

    let err = api.logout().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(api.credential(), None);
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn logout_succeeds_on_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/logout"))
        .and(header("X-Token", "t1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token("t1"));
    let api = client(&server, store.clone());

    api.logout().await.unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[tokio::test]
async fn check_auth_reads_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .and(header("X-Token", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_json("t1")))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_token("t1")));
    let info = api.check_auth().await.unwrap();
    assert_eq!(info.email, "oliver@example.test");
    assert_eq!(info.name, "Oliver");
}

#[tokio::test]
async fn offer_endpoints_decode_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/offers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([offer_json("1", false), offer_json("2", true)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/offers/1/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([offer_json("2", true)])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json("r1")])))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::new()));

    let offers = api.offers().await.unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].kind, "apartment");
    assert_eq!(offers[0].city.name, "Amsterdam");
    assert!(offers[1].is_favorite);

    let nearby = api.nearby("1").await.unwrap();
    assert_eq!(nearby[0].id, "2");

    let reviews = api.reviews("1").await.unwrap();
    assert_eq!(reviews[0].user.name, "Max");
    assert_eq!(reviews[0].rating, 4.0);
}

#[tokio::test]
async fn offer_detail_decodes_host_and_goods() {
    let server = MockServer::start().await;
    let mut detail = offer_json("1", false);
    let fields = detail.as_object_mut().unwrap();
    fields.remove("previewImage");
    fields.insert("description".into(), json!("A quiet cozy and picturesque place."));
    fields.insert("bedrooms".into(), json!(3));
    fields.insert("goods".into(), json!(["Heating", "Kitchen"]));
    fields.insert(
        "host".into(),
        json!({ "name": "Angelina", "avatarUrl": "https://example.test/a.jpg", "isPro": true }),
    );
    fields.insert("images".into(), json!(["https://example.test/1.jpg"]));
    fields.insert("maxAdults".into(), json!(4));
    Mock::given(method("GET"))
        .and(path("/offers/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::new()));
    let offer = api.offer("1").await.unwrap();
    assert_eq!(offer.host.name, "Angelina");
    assert_eq!(offer.goods, vec!["Heating".to_string(), "Kitchen".to_string()]);
    assert_eq!(offer.max_adults, 4);
}

#[tokio::test]
async fn post_review_sends_comment_and_rating() {
    let server = MockServer::start().await;
    let comment = "Quiet neighbourhood, friendly host, the bed could have been a bit bigger.";
    Mock::given(method("POST"))
        .and(path("/comments/1"))
        .and(header("X-Token", "t1"))
        .and(body_json(json!({ "comment": comment, "rating": 4 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(review_json("r9")))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_token("t1")));
    let review = api.post_review("1", 4, comment).await.unwrap();
    assert_eq!(review.id, "r9");
}

#[tokio::test]
async fn set_favorite_encodes_status_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/favorite/1/1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(offer_json("1", true)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/favorite/1/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(offer_json("1", false)))
        .mount(&server)
        .await;

    let api = client(&server, Arc::new(MemoryTokenStore::with_token("t1")));
    let added = api.set_favorite("1", FavoriteStatus::Add).await.unwrap();
    assert!(added.is_favorite);
    let removed = api.set_favorite("1", FavoriteStatus::Remove).await.unwrap();
    assert!(!removed.is_favorite);
}
