use std::fmt;

use crate::{AuthorizationStatus, OfferId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Main,
    Login,
    Favorites,
    Offer(OfferId),
    NotFound,
}

impl Route {
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Favorites)
    }

    pub fn offer_id(&self) -> Option<&str> {
        match self {
            Route::Offer(id) => Some(id),
            _ => None,
        }
    }

    /// Where a request for `self` actually lands given the auth status.
    pub fn guarded(self, status: AuthorizationStatus) -> Route {
        let authorized = status == AuthorizationStatus::Auth;
        match self {
            route if route.is_protected() && !authorized => Route::Login,
            Route::Login if authorized => Route::Main,
            route => route,
        }
    }

    /// Parses a browser-style path such as `/offer/42`.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Route::Main,
            "/login" => Route::Login,
            "/favorites" => Route::Favorites,
            _ => match trimmed.strip_prefix("/offer/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Offer(id.to_string()),
                _ => Route::NotFound,
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Main => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Favorites => write!(f, "/favorites"),
            Route::Offer(id) => write!(f, "/offer/{id}"),
            Route::NotFound => write!(f, "/404"),
        }
    }
}
