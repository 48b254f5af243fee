//! Typed Discord models.
//!
//! Each model is built once from a JSON payload and never mutated afterwards,
//! with the exception of the cache slots on [`User`] that a connections or
//! guilds fetch refreshes.

pub mod base;
pub mod connection;
pub mod guild;
pub mod integration;
pub mod user;

pub use self::base::{DiscordModel, Fetchable, Payload};
pub use self::connection::UserConnection;
pub use self::guild::{Guild, Permissions};
pub use self::integration::{Integration, IntegrationAccount};
pub use self::user::{PremiumType, User, UserFlags};

/// Base URL of Discord's CDN, used for avatar and icon URLs.
pub(crate) const CDN_BASE_URL: &str = "https://cdn.discordapp.com";

/// Animated image hashes are prefixed with `a_`.
pub(crate) fn is_animated_hash(hash: &str) -> bool {
    hash.starts_with("a_")
}
