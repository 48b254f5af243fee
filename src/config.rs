//! Runtime configuration.
//!
//! Values come from the process environment (optionally seeded from a `.env`
//! file when the `io` feature is on):
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DISCORD_TOKEN` | yes | |
//! | `DISCORD_API_BASE_URL` | no | [`DEFAULT_API_BASE_URL`] |
//! | `DISCORD_USERS_CACHE_MAX_LIMIT` | no | [`DEFAULT_USERS_CACHE_MAX_LIMIT`], `0` disables the limit |

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";
pub const DEFAULT_USERS_CACHE_MAX_LIMIT: usize = 100;

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const BASE_URL_VAR: &str = "DISCORD_API_BASE_URL";
const CACHE_LIMIT_VAR: &str = "DISCORD_USERS_CACHE_MAX_LIMIT";

#[derive(Clone)]
pub struct Config {
    /// OAuth2 access token sent as `Authorization: Bearer <token>`.
    pub token: String,
    pub api_base_url: String,
    /// `None` means the users cache is unbounded.
    pub users_cache_max_limit: Option<usize>,
}

impl Config {
    /// Config with the given token and every other value at its default.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            users_cache_max_limit: Some(DEFAULT_USERS_CACHE_MAX_LIMIT),
        }
    }

    /// Load from the process environment, reading `.env` first if present.
    #[cfg(feature = "io")]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingVar(TOKEN_VAR))?;

        let mut config = Self::new(token);

        if let Some(url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(CACHE_LIMIT_VAR) {
            let limit = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidVar {
                    name: CACHE_LIMIT_VAR,
                    value: raw.clone(),
                })?;
            config.users_cache_max_limit = (limit > 0).then_some(limit);
        }

        Ok(config)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("users_cache_max_limit", &self.users_cache_max_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn token_only_uses_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc")])).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(
            config.users_cache_max_limit,
            Some(DEFAULT_USERS_CACHE_MAX_LIMIT)
        );
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DISCORD_TOKEN")));
    }

    #[test]
    fn blank_token_is_treated_as_missing() {
        let err = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_API_BASE_URL", "http://localhost:8080/api/"),
            ("DISCORD_USERS_CACHE_MAX_LIMIT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.users_cache_max_limit, Some(5));
    }

    #[test]
    fn zero_cache_limit_means_unbounded() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_USERS_CACHE_MAX_LIMIT", "0"),
        ]))
        .unwrap();
        assert_eq!(config.users_cache_max_limit, None);
    }

    #[test]
    fn garbage_cache_limit_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_USERS_CACHE_MAX_LIMIT", "lots"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar { name: "DISCORD_USERS_CACHE_MAX_LIMIT", .. }
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let config = Config::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
