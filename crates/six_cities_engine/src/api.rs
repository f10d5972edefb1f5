use async_trait::async_trait;
use serde::Serialize;
use six_cities_core::{AuthInfo, FavoriteStatus, Offer, OfferDetail, Review};
use six_cities_logging::{sc_info, sc_warn};

use crate::{ApiClient, ApiError};

/// The Six Cities REST surface. The engine talks to this trait so tests can
/// substitute a scripted backend.
#[async_trait]
pub trait Api: Send + Sync {
    async fn check_auth(&self) -> Result<AuthInfo, ApiError>;
    /// Signs in and keeps the returned token as the session credential.
    async fn login(&self, email: &str, password: &str) -> Result<AuthInfo, ApiError>;
    /// Signs out. The local credential is dropped whatever the server says.
    async fn logout(&self) -> Result<(), ApiError>;
    async fn offers(&self) -> Result<Vec<Offer>, ApiError>;
    async fn offer(&self, offer_id: &str) -> Result<OfferDetail, ApiError>;
    async fn nearby(&self, offer_id: &str) -> Result<Vec<Offer>, ApiError>;
    async fn reviews(&self, offer_id: &str) -> Result<Vec<Review>, ApiError>;
    async fn post_review(
        &self,
        offer_id: &str,
        rating: u8,
        comment: &str,
    ) -> Result<Review, ApiError>;
    async fn favorites(&self) -> Result<Vec<Offer>, ApiError>;
    async fn set_favorite(&self, offer_id: &str, status: FavoriteStatus)
        -> Result<Offer, ApiError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ReviewBody<'a> {
    comment: &'a str,
    rating: u8,
}

#[async_trait]
impl Api for ApiClient {
    async fn check_auth(&self) -> Result<AuthInfo, ApiError> {
        self.get("/login").await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthInfo, ApiError> {
        let info: AuthInfo = self
            .post("/login", Some(&LoginBody { email, password }))
            .await?;
        if let Err(err) = self.set_credential(&info.token) {
            sc_warn!("Signed in but the token was not persisted: {}", err);
        }
        sc_info!("Credential stored for {}", info.email);
        Ok(info)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let result = self.delete("/logout").await;
        self.clear_credential();
        result
    }

    async fn offers(&self) -> Result<Vec<Offer>, ApiError> {
        self.get("/offers").await
    }

    async fn offer(&self, offer_id: &str) -> Result<OfferDetail, ApiError> {
        self.get(&format!("/offers/{offer_id}")).await
    }

    async fn nearby(&self, offer_id: &str) -> Result<Vec<Offer>, ApiError> {
        self.get(&format!("/offers/{offer_id}/nearby")).await
    }

    async fn reviews(&self, offer_id: &str) -> Result<Vec<Review>, ApiError> {
        self.get(&format!("/comments/{offer_id}")).await
    }

    async fn post_review(
        &self,
        offer_id: &str,
        rating: u8,
        comment: &str,
    ) -> Result<Review, ApiError> {
        self.post(
            &format!("/comments/{offer_id}"),
            Some(&ReviewBody { comment, rating }),
        )
        .await
    }

    async fn favorites(&self) -> Result<Vec<Offer>, ApiError> {
        self.get("/favorite").await
    }

    async fn set_favorite(
        &self,
        offer_id: &str,
        status: FavoriteStatus,
    ) -> Result<Offer, ApiError> {
        let path = format!("/favorite/{offer_id}/{}", status.as_path_segment());
        self.post::<(), Offer>(&path, None).await
    }
}
