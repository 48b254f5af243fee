//! The authenticated Discord user.

use std::fmt::{Display, Formatter, Result as FmtResult};

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::base::{self, DiscordModel, Fetchable};
use super::connection::UserConnection;
use super::guild::Guild;
use super::{is_animated_hash, CDN_BASE_URL};
use crate::error::Result;
use crate::http::Requester;
use crate::session::DiscordSession;

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

bitflags! {
    /// Badges and account flags on a user.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UserFlags: u64 {
        const STAFF = 1 << 0;
        const PARTNER = 1 << 1;
        const HYPESQUAD = 1 << 2;
        const BUG_HUNTER_LEVEL_1 = 1 << 3;
        const HYPESQUAD_ONLINE_HOUSE_1 = 1 << 6;
        const HYPESQUAD_ONLINE_HOUSE_2 = 1 << 7;
        const HYPESQUAD_ONLINE_HOUSE_3 = 1 << 8;
        const PREMIUM_EARLY_SUPPORTER = 1 << 9;
        const TEAM_PSEUDO_USER = 1 << 10;
        const BUG_HUNTER_LEVEL_2 = 1 << 14;
        const VERIFIED_BOT = 1 << 16;
        const VERIFIED_DEVELOPER = 1 << 17;
        const CERTIFIED_MODERATOR = 1 << 18;
        const BOT_HTTP_INTERACTIONS = 1 << 19;
        const ACTIVE_DEVELOPER = 1 << 22;
    }
}

// Unknown bits are kept so new badges survive a round trip.
impl<'de> Deserialize<'de> for UserFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_bits_retain(u64::deserialize(deserializer)?))
    }
}

impl Serialize for UserFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

/// Nitro subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize_repr, Serialize_repr)]
#[repr(u8)]
pub enum PremiumType {
    None = 0,
    NitroClassic = 1,
    Nitro = 2,
    NitroBasic = 3,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A Discord user as returned by `/users/@me`.
///
/// `connections` and `guilds` are not part of the payload. They are cache
/// slots filled by [`UserConnection::fetch_from_api`] and
/// [`Guild::fetch_from_api`] when this user is the session's cached current
/// user, or by [`User::fetch_connections`] / [`User::fetch_guilds`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// `"0"` for accounts on the unique-username system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(rename = "avatar", skip_serializing_if = "Option::is_none")]
    pub avatar_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfa_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Only present with the `email` scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Only present with the `email` scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<UserFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<UserFlags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_type: Option<PremiumType>,

    #[serde(skip)]
    pub connections: Option<Vec<UserConnection>>,
    #[serde(skip)]
    pub guilds: Option<Vec<Guild>>,
}

impl User {
    /// Display name: the global name if set, otherwise the username.
    pub fn name(&self) -> &str {
        self.global_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or_default()
    }

    /// `name#discriminator`, or just the name for unique usernames.
    pub fn tag(&self) -> String {
        let name = self.username.as_deref().unwrap_or_else(|| self.name());
        match self.discriminator.as_deref() {
            Some("0") | None => name.to_string(),
            Some(disc) => format!("{}#{}", name, disc),
        }
    }

    pub fn is_avatar_animated(&self) -> bool {
        self.avatar_hash.as_deref().is_some_and(is_animated_hash)
    }

    /// CDN URL of the user's avatar, or `None` when no avatar is set.
    pub fn avatar_url(&self) -> Option<String> {
        let hash = self.avatar_hash.as_deref()?;
        let ext = if is_animated_hash(hash) { "gif" } else { "png" };
        Some(format!(
            "{}/avatars/{}/{}.{}",
            CDN_BASE_URL, self.id, hash, ext
        ))
    }

    /// CDN URL of the default avatar Discord shows when none is set.
    pub fn default_avatar_url(&self) -> String {
        format!(
            "{}/embed/avatars/{}.png",
            CDN_BASE_URL,
            self.default_avatar_index()
        )
    }

    fn default_avatar_index(&self) -> u64 {
        match self.discriminator.as_deref() {
            Some("0") | None => self.id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0),
            Some(disc) => disc.parse::<u64>().map(|d| d % 5).unwrap_or(0),
        }
    }

    pub fn public_flags(&self) -> UserFlags {
        self.public_flags.unwrap_or_else(UserFlags::empty)
    }

    /// Fetch the current user.
    ///
    /// The fetched id becomes the session's current user id. With `cache`
    /// set, the user is also stored in the session's users cache, replacing
    /// any older entry.
    pub async fn fetch_from_api<R: Requester>(
        session: &mut DiscordSession<R>,
        cache: bool,
    ) -> Result<Self> {
        let user: Self = base::fetch_one(session.requester()).await?;

        session.set_user_id(user.id.clone());
        if cache {
            session.users_cache_mut().insert(user.clone());
        }

        Ok(user)
    }

    /// The session's current user, if it is cached.
    pub fn get_from_cache<R>(session: &DiscordSession<R>) -> Option<&Self> {
        session
            .user_id()
            .and_then(|id| session.users_cache().peek(id))
    }

    /// Fetch this user's connections and store them on `self` as well as on
    /// the cached current user.
    pub async fn fetch_connections<R: Requester>(
        &mut self,
        session: &mut DiscordSession<R>,
    ) -> Result<&[UserConnection]> {
        let connections = UserConnection::fetch_from_api(session, true).await?;
        let slot = self.connections.insert(connections);
        Ok(slot.as_slice())
    }

    /// Fetch this user's guilds and store them on `self` as well as on the
    /// cached current user.
    pub async fn fetch_guilds<R: Requester>(
        &mut self,
        session: &mut DiscordSession<R>,
    ) -> Result<&[Guild]> {
        let guilds = Guild::fetch_from_api(session, true).await?;
        let slot = self.guilds.insert(guilds);
        Ok(slot.as_slice())
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.tag())
    }
}

impl DiscordModel for User {
    const NAME: &'static str = "User";
}

impl Fetchable for User {
    const ROUTE: &'static str = "/users/@me";
    const MANY: bool = false;
}
