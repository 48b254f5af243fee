//! Partial guilds listed by `/users/@me/guilds`.

use std::fmt::{self, Display, Formatter};

use bitflags::bitflags;
use serde::{
    de::{Error as DeError, Unexpected, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::base::{self, DiscordModel, Fetchable};
use super::{is_animated_hash, CDN_BASE_URL};
use crate::error::Result;
use crate::http::Requester;
use crate::session::DiscordSession;

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

bitflags! {
    /// The current user's permissions in a guild.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        const CREATE_INVITE = 1 << 0;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const MANAGE_MESSAGES = 1 << 13;
        const MENTION_EVERYONE = 1 << 17;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MODERATE_MEMBERS = 1 << 40;
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::empty()
    }
}

struct PermissionsVisitor;

impl Visitor<'_> for PermissionsVisitor {
    type Value = Permissions;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a permission bitset as a decimal string or integer")
    }

    fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Permissions::from_bits_retain(v))
    }

    fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(Permissions::from_bits_retain)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<u64>()
            .map(Permissions::from_bits_retain)
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

// Discord sends permissions as a string since they outgrew 53 bits.
impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PermissionsVisitor)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.bits())
    }
}

// ---------------------------------------------------------------------------
// Guild
// ---------------------------------------------------------------------------

/// A guild the current user is a member of.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Guild {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "icon", skip_serializing_if = "Option::is_none")]
    pub icon_hash: Option<String>,
    #[serde(rename = "owner", default)]
    pub is_owner: bool,
    #[serde(default)]
    pub permissions: Permissions,
}

impl Guild {
    /// CDN URL of the guild icon, or `None` when the guild has no icon.
    pub fn icon_url(&self) -> Option<String> {
        let hash = self.icon_hash.as_deref()?;
        let ext = if is_animated_hash(hash) { "gif" } else { "png" };
        Some(format!("{}/icons/{}/{}.{}", CDN_BASE_URL, self.id, hash, ext))
    }

    /// Fetch the guilds of the current user.
    ///
    /// With `cache` set, the cached current user (if any) gets its `guilds`
    /// slot replaced by the fetched list.
    pub async fn fetch_from_api<R: Requester>(
        session: &mut DiscordSession<R>,
        cache: bool,
    ) -> Result<Vec<Self>> {
        let guilds: Vec<Self> = base::fetch_many(session.requester()).await?;

        if cache {
            session.refresh_cached_guilds(&guilds);
        }

        Ok(guilds)
    }
}

impl Display for Guild {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

impl DiscordModel for Guild {
    const NAME: &'static str = "Guild";
}

impl Fetchable for Guild {
    const ROUTE: &'static str = "/users/@me/guilds";
    const MANY: bool = true;
}
