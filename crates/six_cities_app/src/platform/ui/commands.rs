//! Line-oriented input: each stdin line becomes one user intent.

use six_cities_core::{Msg, Route, SortType, CITY_NAMES};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown city {0:?}; choose one of {cities}", cities = CITY_NAMES.join(", "))]
    UnknownCity(String),
    #[error("unknown sort {0:?}; choose popular, price-low, price-high or rating")]
    UnknownSort(String),
    #[error("rating must be a number from 1 to 5")]
    InvalidRating,
}

pub const HELP: &str = "\
commands:
  city <name>               switch city tab
  sort <key>                popular | price-low | price-high | rating
  open <offer id>           show an offer
  fav <offer id>            toggle bookmark
  review <1-5> <comment>    post a review on the open offer
  login <email> <password>  sign in
  login                     go to the sign-in page
  logout                    sign out
  favorites                 show bookmarked offers
  home                      back to the offer list
  go <path>                 navigate, e.g. /offer/3 or /favorites
  reload                    fetch offers again
  show                      print the current page
  quit";

pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "show" | "ls" => Command::Show,
        "quit" | "exit" => Command::Quit,
        "city" => Command::Dispatch(Msg::ChangeCity(parse_city(rest)?)),
        "sort" => {
            let sort = SortType::from_key(rest)
                .ok_or_else(|| CommandError::UnknownSort(rest.to_string()))?;
            Command::Dispatch(Msg::SetSortType(sort))
        }
        "open" => Command::Dispatch(Msg::Navigate(Route::Offer(
            single_arg(rest, "open <offer id>")?.to_string(),
        ))),
        "fav" => Command::Dispatch(Msg::ToggleFavorite {
            offer_id: single_arg(rest, "fav <offer id>")?.to_string(),
        }),
        "review" => parse_review(rest)?,
        "login" if rest.is_empty() => Command::Dispatch(Msg::Navigate(Route::Login)),
        "login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(email), Some(password), None) => Command::Dispatch(Msg::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }),
                _ => return Err(CommandError::Usage("login <email> <password>")),
            }
        }
        "logout" => Command::Dispatch(Msg::Logout),
        "favorites" => Command::Dispatch(Msg::Navigate(Route::Favorites)),
        "home" | "main" => Command::Dispatch(Msg::Navigate(Route::Main)),
        "go" => Command::Dispatch(Msg::Navigate(Route::from_path(single_arg(
            rest,
            "go <path>",
        )?))),
        "reload" => Command::Dispatch(Msg::LoadOffers),
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn single_arg<'a>(rest: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(CommandError::Usage(usage));
    }
    Ok(rest)
}

fn parse_city(rest: &str) -> Result<String, CommandError> {
    CITY_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(rest))
        .map(|name| name.to_string())
        .ok_or_else(|| CommandError::UnknownCity(rest.to_string()))
}

fn parse_review(rest: &str) -> Result<Command, CommandError> {
    let Some((rating, comment)) = rest.split_once(char::is_whitespace) else {
        return Err(CommandError::Usage("review <1-5> <comment>"));
    };
    let rating: u8 = rating.parse().map_err(|_| CommandError::InvalidRating)?;
    Ok(Command::Dispatch(Msg::SubmitReview {
        rating,
        comment: comment.trim().to_string(),
    }))
}
