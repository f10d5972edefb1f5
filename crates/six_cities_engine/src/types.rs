use std::fmt;

use six_cities_core::{AuthInfo, Offer, OfferDetail, OfferId, RequestId, Review};

/// Completion of one engine command, sent back to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AuthChecked(Result<AuthInfo, ApiError>),
    LoggedIn(Result<AuthInfo, ApiError>),
    LoggedOut(Result<(), ApiError>),
    OffersFetched(Result<Vec<Offer>, ApiError>),
    FavoritesFetched(Result<Vec<Offer>, ApiError>),
    OfferFetched {
        request: RequestId,
        result: Result<OfferDetail, ApiError>,
    },
    NearbyFetched {
        request: RequestId,
        result: Result<Vec<Offer>, ApiError>,
    },
    ReviewsFetched {
        request: RequestId,
        result: Result<Vec<Review>, ApiError>,
    },
    ReviewPosted {
        offer_id: OfferId,
        result: Result<Review, ApiError>,
    },
    FavoriteSet {
        offer_id: OfferId,
        result: Result<Offer, ApiError>,
    },
    /// The server answered 401 and the stored credential was dropped.
    CredentialCleared,
}

impl EngineEvent {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            EngineEvent::AuthChecked(result) | EngineEvent::LoggedIn(result) => result.as_ref().err(),
            EngineEvent::LoggedOut(result) => result.as_ref().err(),
            EngineEvent::OffersFetched(result)
            | EngineEvent::FavoritesFetched(result)
            | EngineEvent::NearbyFetched { result, .. } => result.as_ref().err(),
            EngineEvent::OfferFetched { result, .. } => result.as_ref().err(),
            EngineEvent::ReviewsFetched { result, .. } => result.as_ref().err(),
            EngineEvent::ReviewPosted { result, .. } => result.as_ref().err(),
            EngineEvent::FavoriteSet { result, .. } => result.as_ref().err(),
            EngineEvent::CredentialCleared => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Unauthorized,
    NotFound,
    HttpStatus(u16),
    Timeout,
    Decode,
    Storage,
    Runtime,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::NotFound => write!(f, "not found"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Storage => write!(f, "credential storage error"),
            FailureKind::Runtime => write!(f, "engine runtime unavailable"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
