//! Client-side form checks. Failures are shown next to the form and never
//! reach the network or a slice's error channel.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

pub const REVIEW_MIN_LENGTH: usize = 50;
pub const REVIEW_MAX_LENGTH: usize = 300;
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must contain at least one letter and one digit")]
    PasswordWeak,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Comment is required")]
    CommentRequired,
    #[error("Comment must be at least {min} characters")]
    CommentTooShort { min: usize },
    #[error("Comment must not exceed {max} characters")]
    CommentTooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginFormErrors {
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
}

impl LoginFormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::PasswordWeak)
    }
}

/// Checks both login fields, reporting every failure at once.
pub fn validate_login(email: &str, password: &str) -> Result<(), LoginFormErrors> {
    let errors = LoginFormErrors {
        email: validate_email(email).err(),
        password: validate_password(password).err(),
    };
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_review(rating: u8, comment: &str) -> Result<(), ValidationError> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }
    if comment.trim().is_empty() {
        return Err(ValidationError::CommentRequired);
    }
    let length = comment.chars().count();
    if length < REVIEW_MIN_LENGTH {
        return Err(ValidationError::CommentTooShort {
            min: REVIEW_MIN_LENGTH,
        });
    }
    if length > REVIEW_MAX_LENGTH {
        return Err(ValidationError::CommentTooLong {
            max: REVIEW_MAX_LENGTH,
        });
    }
    Ok(())
}
