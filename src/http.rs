//! Transport seam for the Discord REST API.
//!
//! Every model fetch goes through a [`Requester`], so auth, headers and error
//! mapping live in one place and tests can swap in canned responses. The
//! production implementation is [`DiscordHttpClient`] (feature `io`).

use async_trait::async_trait;

use crate::error::HttpError;

/// Performs one authenticated GET against a relative API route.
#[async_trait]
pub trait Requester: Send + Sync {
    /// GET `route` (e.g. `/users/@me/connections`) and parse the body as JSON.
    async fn get_json(&self, route: &str) -> Result<serde_json::Value, HttpError>;
}

// ---------------------------------------------------------------------------
// Rate-limit info parsed from response headers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateLimitInfo {
    pub remaining: Option<u32>,
    pub reset_after: Option<f64>,
    pub bucket: Option<String>,
    pub is_global: bool,
}

impl RateLimitInfo {
    /// Parse the `x-ratelimit-*` family from any header lookup.
    ///
    /// `retry-after` is used when `x-ratelimit-reset-after` is absent, which
    /// is what Discord sends on a global 429.
    pub fn from_headers<'a, F>(get_header: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let remaining = get_header("x-ratelimit-remaining").and_then(|s| s.parse::<u32>().ok());

        let reset_after = get_header("x-ratelimit-reset-after")
            .or_else(|| get_header("retry-after"))
            .and_then(|s| s.parse::<f64>().ok());

        let bucket = get_header("x-ratelimit-bucket").map(str::to_string);

        let is_global = get_header("x-ratelimit-global").is_some_and(|s| s == "true")
            || get_header("x-ratelimit-scope").is_some_and(|s| s == "global");

        Self {
            remaining,
            reset_after,
            bucket,
            is_global,
        }
    }
}

// ---------------------------------------------------------------------------
// DiscordHttpClient
// ---------------------------------------------------------------------------

#[cfg(feature = "io")]
pub use self::client::DiscordHttpClient;

#[cfg(feature = "io")]
mod client {
    use async_trait::async_trait;
    use reqwest::{header, StatusCode};
    use tracing::{debug, warn};

    use super::{RateLimitInfo, Requester};
    use crate::config::{Config, DEFAULT_API_BASE_URL};
    use crate::error::HttpError;

    const USER_AGENT: &str = concat!("DiscordBot (discord-models, ", env!("CARGO_PKG_VERSION"), ")");

    /// A thin reqwest-backed client that authenticates with an OAuth2 bearer
    /// token.
    ///
    /// Cheap to clone (reqwest's client is an `Arc` internally). No retries
    /// are attempted: a 429 surfaces as [`HttpError::RateLimited`].
    #[derive(Clone)]
    pub struct DiscordHttpClient {
        token: String,
        base_url: String,
        inner: reqwest::Client,
    }

    impl DiscordHttpClient {
        /// Create a client against the default API base URL.
        pub fn new(token: impl Into<String>) -> Self {
            Self::with_base_url(token, DEFAULT_API_BASE_URL)
        }

        pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
            Self {
                token: token.into(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
                inner: reqwest::Client::new(),
            }
        }

        pub fn from_config(config: &Config) -> Self {
            Self::with_base_url(&config.token, &config.api_base_url)
        }

        fn url(&self, route: &str) -> String {
            format!("{}/{}", self.base_url, route.trim_start_matches('/'))
        }
    }

    #[async_trait]
    impl Requester for DiscordHttpClient {
        async fn get_json(&self, route: &str) -> Result<serde_json::Value, HttpError> {
            debug!(route, "GET");

            let resp = self
                .inner
                .get(self.url(route))
                .bearer_auth(&self.token)
                .header(header::USER_AGENT, USER_AGENT)
                .send()
                .await
                .map_err(HttpError::transport)?;

            let status = resp.status();
            let headers = resp.headers();
            let rl_info = RateLimitInfo::from_headers(|name| {
                headers.get(name).and_then(|v| v.to_str().ok())
            });

            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!(
                    route,
                    retry_after_s = rl_info.reset_after,
                    global = rl_info.is_global,
                    bucket = rl_info.bucket.as_deref(),
                    "rate-limited by Discord"
                );
                return Err(HttpError::RateLimited {
                    route: route.to_string(),
                    retry_after: rl_info.reset_after,
                    global: rl_info.is_global,
                });
            }

            let bytes = resp
                .bytes()
                .await
                .map_err(HttpError::transport)?;

            if !status.is_success() {
                return Err(HttpError::Api {
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&bytes).into_owned(),
                    route: route.to_string(),
                });
            }

            debug!(
                route,
                status = status.as_u16(),
                remaining = rl_info.remaining,
                "response received"
            );

            serde_json::from_slice(&bytes).map_err(|e| {
                let raw: String = String::from_utf8_lossy(&bytes).chars().take(200).collect();
                HttpError::Decode {
                    route: route.to_string(),
                    message: format!("{}: {}", e, raw),
                }
            })
        }
    }

    impl std::fmt::Debug for DiscordHttpClient {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("DiscordHttpClient")
                .field("token", &"<redacted>")
                .field("base_url", &self.base_url)
                .finish()
        }
    }

}
