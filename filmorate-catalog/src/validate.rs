//! Input validation rules applied before anything is persisted.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{Director, Film, User};

/// Longest allowed film description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// The first public film screening. No release may predate it.
pub const EARLIEST_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid earliest release date"),
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Film name cannot be blank")]
    BlankFilmName,
    #[error("Description is {len} characters long, the limit is {MAX_DESCRIPTION_LEN}")]
    DescriptionTooLong { len: usize },
    #[error("Release date {0} is before {EARLIEST_RELEASE_DATE}")]
    ReleaseTooEarly(NaiveDate),
    #[error("Duration must be positive, got {0}")]
    NonPositiveDuration(i32),
    #[error("Email must be non-blank and contain '@': '{0}'")]
    InvalidEmail(String),
    #[error("Login must be non-blank and contain no spaces: '{0}'")]
    InvalidLogin(String),
    #[error("Birthday {0} is in the future")]
    FutureBirthday(NaiveDate),
    #[error("Director name cannot be blank")]
    BlankDirectorName,
    #[error("User {0} cannot befriend themselves")]
    SelfFriendship(i64),
}

/// Check a film's scalar fields. References are resolved separately.
pub fn validate_film(film: &Film) -> Result<(), ValidationError> {
    if film.name.trim().is_empty() {
        return Err(ValidationError::BlankFilmName);
    }
    let len = film.description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong { len });
    }
    if film.release_date < EARLIEST_RELEASE_DATE {
        return Err(ValidationError::ReleaseTooEarly(film.release_date));
    }
    if film.duration <= 0 {
        return Err(ValidationError::NonPositiveDuration(film.duration));
    }
    Ok(())
}

/// Check a user against today's local date.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    validate_user_at(user, chrono::Local::now().date_naive())
}

/// Check a user, treating `today` as the latest acceptable birthday.
pub fn validate_user_at(user: &User, today: NaiveDate) -> Result<(), ValidationError> {
    if user.email.trim().is_empty() || !user.email.contains('@') {
        return Err(ValidationError::InvalidEmail(user.email.clone()));
    }
    if user.login.trim().is_empty() || user.login.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidLogin(user.login.clone()));
    }
    if user.birthday > today {
        return Err(ValidationError::FutureBirthday(user.birthday));
    }
    Ok(())
}

pub fn validate_director(director: &Director) -> Result<(), ValidationError> {
    if director.name.trim().is_empty() {
        return Err(ValidationError::BlankDirectorName);
    }
    Ok(())
}

pub fn validate_friendship(user_id: i64, friend_id: i64) -> Result<(), ValidationError> {
    if user_id == friend_id {
        return Err(ValidationError::SelfFriendship(user_id));
    }
    Ok(())
}
