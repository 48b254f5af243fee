//! Third-party accounts linked to a Discord profile.

use serde::{Deserialize, Serialize};

use super::base::{self, DiscordModel, Fetchable};
use super::integration::Integration;
use crate::error::Result;
use crate::http::Requester;
use crate::session::DiscordSession;

/// One linked account (Twitch, YouTube, Steam, ...) on the user's profile.
///
/// Every field but `id` is optional; `integrations` is empty when the
/// payload has none.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserConnection {
    /// ID of the connection account.
    pub id: String,
    /// Username of the connection account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Service of the connection (`twitch`, `youtube`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    /// Server integrations, in payload order.
    #[serde(default)]
    pub integrations: Vec<Integration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_sync: Option<bool>,
    /// Whether activities from this connection show up in presence updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_activity: Option<bool>,
    /// Visibility code: 0 = only the user, 1 = everyone. Any other non-zero
    /// code also counts as visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<i64>,
    /// Whether the connection has a matching third-party OAuth2 token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_way_link: Option<bool>,
}

impl UserConnection {
    /// Whether this connection is visible to everyone.
    pub fn is_visible(&self) -> bool {
        self.visibility.is_some_and(|v| v != 0)
    }

    /// Fetch the current user's connections.
    ///
    /// With `cache` set, the cached current user (if the session has one)
    /// gets its `connections` slot replaced by the fetched list. A missing
    /// cache entry is not an error.
    pub async fn fetch_from_api<R: Requester>(
        session: &mut DiscordSession<R>,
        cache: bool,
    ) -> Result<Vec<Self>> {
        let connections: Vec<Self> = base::fetch_many(session.requester()).await?;

        if cache {
            session.refresh_cached_connections(&connections);
        }

        Ok(connections)
    }
}

impl DiscordModel for UserConnection {
    const NAME: &'static str = "UserConnection";
}

impl Fetchable for UserConnection {
    const ROUTE: &'static str = "/users/@me/connections";
    const MANY: bool = true;
}
