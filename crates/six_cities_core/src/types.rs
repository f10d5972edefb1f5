use std::fmt;

use serde::{Deserialize, Serialize};

pub type OfferId = String;

/// Monotonic token attached to every offer-detail load.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub location: Location,
}

/// Names of the cities the service lists offers for, in tab order.
pub const CITY_NAMES: [&str; 6] = [
    "Paris",
    "Cologne",
    "Brussels",
    "Amsterdam",
    "Hamburg",
    "Dusseldorf",
];

pub const DEFAULT_CITY: &str = "Paris";

impl City {
    /// Reference data for one of the supported cities.
    pub fn by_name(name: &str) -> Option<City> {
        let (latitude, longitude) = match name {
            "Paris" => (48.85661, 2.351499),
            "Cologne" => (50.938361, 6.959974),
            "Brussels" => (50.846557, 4.351697),
            "Amsterdam" => (52.37454, 4.897976),
            "Hamburg" => (53.550341, 10.000654),
            "Dusseldorf" => (51.225402, 6.776314),
            _ => return None,
        };
        Some(City {
            name: name.to_string(),
            location: Location {
                latitude,
                longitude,
                zoom: 13,
            },
        })
    }

    pub fn all() -> Vec<City> {
        CITY_NAMES.iter().filter_map(|name| City::by_name(name)).collect()
    }
}

impl Default for City {
    fn default() -> Self {
        City::by_name(DEFAULT_CITY).unwrap_or_else(|| City {
            name: DEFAULT_CITY.to_string(),
            location: Location::default(),
        })
    }
}

/// A single rental listing as returned by `GET /offers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: u32,
    pub city: City,
    pub location: Location,
    pub is_favorite: bool,
    pub is_premium: bool,
    pub rating: f64,
    pub preview_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

/// Full record for one offer, as returned by `GET /offers/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDetail {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: u32,
    pub city: City,
    pub location: Location,
    pub is_favorite: bool,
    pub is_premium: bool,
    pub rating: f64,
    pub description: String,
    pub bedrooms: u32,
    pub goods: Vec<String>,
    pub host: Host,
    pub images: Vec<String>,
    pub max_adults: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUser {
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: ReviewUser,
    pub rating: f64,
    pub comment: String,
    /// ISO-8601 timestamp as sent by the server.
    pub date: String,
}

/// Profile returned by `POST /login` and `GET /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthInfo {
    pub email: String,
    pub token: String,
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    #[default]
    Unknown,
    Auth,
    NoAuth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortType {
    #[default]
    Popular,
    PriceLow,
    PriceHigh,
    TopRated,
}

impl SortType {
    pub const ALL: [SortType; 4] = [
        SortType::Popular,
        SortType::PriceLow,
        SortType::PriceHigh,
        SortType::TopRated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortType::Popular => "Popular",
            SortType::PriceLow => "Price: low to high",
            SortType::PriceHigh => "Price: high to low",
            SortType::TopRated => "Top rated first",
        }
    }

    /// Parses the short keys used on the command line (`popular`, `price-low`, ...).
    pub fn from_key(key: &str) -> Option<SortType> {
        match key.trim().to_ascii_lowercase().as_str() {
            "popular" => Some(SortType::Popular),
            "price-low" | "pricelow" => Some(SortType::PriceLow),
            "price-high" | "pricehigh" => Some(SortType::PriceHigh),
            "rating" | "top-rated" => Some(SortType::TopRated),
            _ => None,
        }
    }
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Favorite status sent to `POST /favorite/{id}/{status}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteStatus {
    Remove = 0,
    Add = 1,
}

impl FavoriteStatus {
    pub fn for_target(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteStatus::Add
        } else {
            FavoriteStatus::Remove
        }
    }

    pub fn as_path_segment(self) -> u8 {
        self as u8
    }
}
