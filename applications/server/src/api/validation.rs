//! Payload validation
//!
//! Payload structs default missing string fields to empty so that an absent
//! field and an empty one are reported the same way, as a 400.

use crate::error::{Result, ServerError};
use chrono::{Datelike, Utc};

/// Width of the id columns
pub const MAX_ID_LENGTH: usize = 50;

pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServerError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Reject values longer than `max` characters
pub fn require_max_len(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(ServerError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Song year must not lie in the future
pub fn validate_year(year: Option<i32>) -> Result<i32> {
    let year = year.ok_or_else(|| ServerError::BadRequest("year is required".to_string()))?;
    let current = Utc::now().year();

    if !(0..=current).contains(&year) {
        return Err(ServerError::BadRequest(format!(
            "year must be between 0 and {current}"
        )));
    }
    Ok(year)
}

/// Loose address check: `local@domain.tld`, no whitespace
pub fn validate_email(field: &str, value: &str) -> Result<()> {
    require_non_empty(field, value)?;

    let invalid = || ServerError::BadRequest(format!("{field} must be a valid email address"));

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    let valid_domain = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());

    if local.is_empty() || domain.contains('@') || !valid_domain {
        return Err(invalid());
    }
    Ok(())
}
