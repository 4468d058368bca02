//! Where the suite points and who it logs in as.
//!
//! Resolved from the environment with fixed fallbacks: `API_BASE_URL`
//! (default: the public restful-booker instance), `API_USERNAME` and
//! `API_PASSWORD` (default: the demo service's fixed admin account).

use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://restful-booker.herokuapp.com";
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "password123";

pub const BASE_URL_VAR: &str = "API_BASE_URL";
pub const USERNAME_VAR: &str = "API_USERNAME";
pub const PASSWORD_VAR: &str = "API_PASSWORD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub credentials: Credentials,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment. Empty
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            base_url: var(BASE_URL_VAR, DEFAULT_BASE_URL),
            credentials: Credentials::new(
                var(USERNAME_VAR, DEFAULT_USERNAME),
                var(PASSWORD_VAR, DEFAULT_PASSWORD),
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
