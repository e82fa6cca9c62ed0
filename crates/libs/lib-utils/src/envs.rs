//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an optional environment variable. Unset and blank values are both `None`.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Get and parse an optional environment variable.
///
/// Returns `Ok(None)` when the variable is unset, and an error when it is set
/// but does not parse.
pub fn get_env_parse_opt<T: FromStr>(name: &'static str) -> Result<Option<T>, Error> {
    match get_env_opt(name) {
        Some(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::WrongFormat(name)),
        None => Ok(None),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
