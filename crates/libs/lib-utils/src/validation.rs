//! # Validation Utilities
//!
//! Input validation helpers.

use std::fmt::Display;

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate that a URL uses the `http` or `https` scheme.
pub fn validate_url_scheme(url: &str, field_name: &str) -> Result<(), String> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(format!("{} must start with http:// or https://", field_name))
    }
}

/// Validate that a value lies within `min..=max`.
pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<(), String>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        Err(format!("{} must be between {} and {}", field_name, min, max))
    } else {
        Ok(())
    }
}
