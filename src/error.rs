//! Error types shared across the crate.
//!
//! Transport failures are surfaced as [`HttpError`] and propagated unmodified
//! by every fetch. Payloads that can't be turned into a model produce a
//! [`ModelError`]. Cache misses are never errors.

use std::sync::Arc;

use thiserror::Error;

/// Convenience alias used by the fetch entry points.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error returned by the fetch entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure of a single REST round trip.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Non-success status from Discord.
    #[error("Discord API error {status} on {route}: {body}")]
    Api {
        status: u16,
        body: String,
        route: String,
    },

    /// Discord answered 429. `retry_after` is in seconds when the headers
    /// carried it.
    #[error("rate-limited by Discord on {route} (retry after {retry_after:?}s, global: {global})")]
    RateLimited {
        route: String,
        retry_after: Option<f64>,
        global: bool,
    },

    /// Transport / network error.
    #[error("HTTP transport error: {0}")]
    Transport(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// The response body was not valid JSON.
    #[error("failed to decode response from {route}: {message}")]
    Decode { route: String, message: String },
}

impl HttpError {
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        HttpError::Transport(Arc::new(err))
    }

    /// HTTP status associated with this error, if Discord sent one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            HttpError::RateLimited { .. } => Some(429),
            HttpError::Transport(_) | HttpError::Decode { .. } => None,
        }
    }
}

/// A payload could not be turned into a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A required field is missing or a field has the wrong JSON type.
    #[error("invalid {model} payload: {source}")]
    Payload {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A single-resource route returned something other than a JSON object.
    #[error("expected a JSON object for {model}")]
    NotAnObject { model: &'static str },

    /// A list route returned something other than a JSON array.
    #[error("expected a JSON array of {model}")]
    NotAnArray { model: &'static str },
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {name}")]
    InvalidVar { name: &'static str, value: String },
}
