//! Typed models for the Discord OAuth2 REST API.
//!
//! A [`DiscordSession`] owns the authenticated [`Requester`] and a
//! session-scoped [`UsersCache`]. Each model in [`models`] knows its route and
//! cardinality and exposes a `fetch_from_api` entry point that issues one GET,
//! builds the typed objects and optionally refreshes the cached current user.
//!
//! ```ignore
//! let config = Config::from_env()?;
//! let mut session = DiscordSession::from_config(&config);
//!
//! let user = User::fetch_from_api(&mut session, true).await?;
//! let connections = UserConnection::fetch_from_api(&mut session, true).await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use self::cache::UsersCache;
pub use self::config::Config;
pub use self::error::{ConfigError, Error, HttpError, ModelError, Result};
pub use self::http::Requester;
#[cfg(feature = "io")]
pub use self::http::DiscordHttpClient;
pub use self::models::{
    DiscordModel, Fetchable, Guild, Integration, IntegrationAccount, Payload, Permissions, PremiumType,
    User, UserConnection, UserFlags,
};
pub use self::session::DiscordSession;
