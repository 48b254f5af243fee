//! The authenticated session that models are fetched through.

use tracing::debug;

use crate::cache::UsersCache;
use crate::models::{Guild, UserConnection};

/// Owns the [`Requester`](crate::http::Requester), the id of the user the token belongs to (once
/// known) and the [`UsersCache`].
///
/// Fetches that refresh the cache take the session by `&mut`, so one session
/// serves one logical caller at a time.
#[derive(Debug)]
pub struct DiscordSession<R> {
    requester: R,
    user_id: Option<String>,
    users_cache: UsersCache,
}

impl<R> DiscordSession<R> {
    pub fn new(requester: R) -> Self {
        Self::with_cache(requester, UsersCache::default())
    }

    pub fn with_cache(requester: R, users_cache: UsersCache) -> Self {
        Self {
            requester,
            user_id: None,
            users_cache,
        }
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Id of the user the session's token belongs to, set by
    /// [`User::fetch_from_api`](crate::models::User::fetch_from_api).
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    pub fn clear_user_id(&mut self) {
        self.user_id = None;
    }

    pub fn users_cache(&self) -> &UsersCache {
        &self.users_cache
    }

    pub fn users_cache_mut(&mut self) -> &mut UsersCache {
        &mut self.users_cache
    }

    /// Best-effort refresh of the cached current user's connections.
    ///
    /// Returns whether a cached user was updated.
    pub fn refresh_cached_connections(&mut self, connections: &[UserConnection]) -> bool {
        let Some(user_id) = self.user_id.as_deref() else {
            debug!("no current user id, connections cache left as is");
            return false;
        };

        let updated = self
            .users_cache
            .refresh_connections(user_id, connections.to_vec());
        if !updated {
            debug!(user_id, "current user not cached, connections cache left as is");
        }
        updated
    }

    /// Best-effort refresh of the cached current user's guilds.
    ///
    /// Returns whether a cached user was updated.
    pub fn refresh_cached_guilds(&mut self, guilds: &[Guild]) -> bool {
        let Some(user_id) = self.user_id.as_deref() else {
            debug!("no current user id, guilds cache left as is");
            return false;
        };

        let updated = self.users_cache.refresh_guilds(user_id, guilds.to_vec());
        if !updated {
            debug!(user_id, "current user not cached, guilds cache left as is");
        }
        updated
    }
}

#[cfg(feature = "io")]
impl DiscordSession<crate::http::DiscordHttpClient> {
    /// A session backed by the reqwest client, sized per the config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let cache = UsersCache::new(config.users_cache_max_limit.unwrap_or(0));
        Self::with_cache(crate::http::DiscordHttpClient::from_config(config), cache)
    }
}
