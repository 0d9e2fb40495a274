use bigdecimal::BigDecimal;
use std::fmt;

use crate::domain::money::{from_cents, has_cent_precision};

pub const EMAIL_MAX_LEN: usize = 254;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MAX_LEN: usize = 72;
pub const MATCH_FIELD_MAX_LEN: usize = 200;
pub const SELECTION_MAX_LEN: usize = 100;

/// Odds bounds in hundredths: `1.01 ..= 1000.00`.
pub const MIN_ODDS_CENTS: i64 = 101;
pub const MAX_ODDS_CENTS: i64 = 100_000;
/// Stake bounds in hundredths: `0.01 ..= 10000.00`.
pub const MIN_STAKE_CENTS: i64 = 1;
pub const MAX_STAKE_CENTS: i64 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

pub fn sanitize_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }

    Ok(())
}

/// Loose shape check: one `@`, something before it, a dot in the domain.
pub fn validate_email(email: &str) -> ValidationResult {
    validate_required("email", email)?;
    validate_max_len("email", email, EMAIL_MAX_LEN)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::new("email", "is not a valid email address"));
    }

    Ok(())
}

pub fn validate_username(username: &str) -> ValidationResult {
    validate_required("username", username)?;
    validate_max_len("username", username, USERNAME_MAX_LEN)
}

pub fn validate_password(field: &'static str, password: &str) -> ValidationResult {
    validate_required(field, password)?;
    // bcrypt only looks at the first 72 bytes.
    if password.len() > PASSWORD_MAX_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} bytes", PASSWORD_MAX_LEN),
        ));
    }

    Ok(())
}

fn validate_cent_range(
    field: &'static str,
    value: &BigDecimal,
    min_cents: i64,
    max_cents: i64,
) -> ValidationResult {
    if !has_cent_precision(value) {
        return Err(ValidationError::new(
            field,
            "must have at most two decimal places",
        ));
    }

    let (min, max) = (from_cents(min_cents), from_cents(max_cents));
    if *value < min || *value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {} and {}", min, max),
        ));
    }

    Ok(())
}

pub fn validate_odds(odds: &BigDecimal) -> ValidationResult {
    validate_cent_range("odds", odds, MIN_ODDS_CENTS, MAX_ODDS_CENTS)
}

pub fn validate_stake(stake: &BigDecimal) -> ValidationResult {
    validate_cent_range("stake", stake, MIN_STAKE_CENTS, MAX_STAKE_CENTS)
}
