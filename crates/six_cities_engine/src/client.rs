use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use six_cities_logging::{sc_debug, sc_info, sc_warn};
use url::Url;

use crate::token::TokenStore;
use crate::{ApiError, FailureKind};

pub const DEFAULT_BASE_URL: &str = "https://14.design.htmlacademy.pro/six-cities";
pub const AUTH_HEADER: &str = "X-Token";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Error body the server sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: String,
}

/// HTTP wrapper bound to one base URL. Owns the session credential: it is
/// seeded from the token store, sent as `X-Token` on every request and
/// dropped (together with the stored token) when the server answers 401.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    credential: RwLock<Option<String>>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(settings: ApiSettings, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let parsed = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        let credential = match tokens.load() {
            Ok(token) => token,
            Err(err) => {
                sc_warn!("Could not read stored token: {}", err);
                None
            }
        };

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            credential: RwLock::new(credential),
            tokens,
        })
    }

    pub fn credential(&self) -> Option<String> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Persists the token and attaches it to subsequent requests. The
    /// in-memory credential is set even when persisting fails.
    pub fn set_credential(&self, token: &str) -> Result<(), ApiError> {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        self.tokens
            .save(token)
            .map_err(|err| ApiError::new(FailureKind::Storage, err.to_string()))
    }

    pub fn clear_credential(&self) {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        if let Err(err) = self.tokens.clear() {
            sc_warn!("Could not remove stored token: {}", err);
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let bytes = self.send(Method::GET, path, None).await?;
        decode(&bytes)
    }

    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        let bytes = self.send(Method::POST, path, body).await?;
        decode(&bytes)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.credential() {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        sc_debug!("{} {} -> {}", method, path, status.as_u16());

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let message = serde_json::from_slice::<ServerMessage>(&bytes)
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());

        let kind = match status {
            StatusCode::UNAUTHORIZED => {
                sc_info!("Server rejected the credential; signing out");
                self.clear_credential();
                FailureKind::Unauthorized
            }
            StatusCode::NOT_FOUND => FailureKind::NotFound,
            other => FailureKind::HttpStatus(other.as_u16()),
        };
        Err(ApiError::new(kind, message))
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
