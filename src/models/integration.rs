//! Server integrations attached to a user connection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::base::DiscordModel;
use super::user::User;

/// How a server integration (Twitch subscriptions, YouTube memberships, ...)
/// is wired up to a linked account.
///
/// Only ever seen nested inside a [`UserConnection`](super::UserConnection).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Integration {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Integration type (`twitch`, `youtube`, `discord`, ...).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syncing: Option<bool>,
    /// Role this integration uses for subscribers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_emoticons: Option<bool>,
    /// 0 = remove role, 1 = kick.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_behavior: Option<u8>,
    /// Grace period in days before expiring subscribers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_grace_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<IntegrationAccount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
}

/// The third-party account behind an [`Integration`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IntegrationAccount {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DiscordModel for Integration {
    const NAME: &'static str = "Integration";
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn full_payload() {
        let integration = Integration::from_value(json!({
            "id": "33590653072239123",
            "name": "A Name",
            "type": "twitch",
            "enabled": true,
            "syncing": false,
            "role_id": "8",
            "enable_emoticons": true,
            "expire_behavior": 1,
            "expire_grace_period": 7,
            "user": { "id": "42", "username": "streamer" },
            "account": { "id": "acc1", "name": "streamer_tv" },
            "synced_at": "2021-06-01T12:30:00.000000+00:00",
            "subscriber_count": 1337,
            "revoked": false
        }))
        .unwrap();

        assert_eq!(integration.id, "33590653072239123");
        assert_eq!(integration.kind.as_deref(), Some("twitch"));
        assert_eq!(integration.expire_grace_period, Some(7));
        assert_eq!(integration.user.as_ref().map(|u| u.id.as_str()), Some("42"));
        assert_eq!(
            integration.account,
            Some(IntegrationAccount {
                id: "acc1".to_string(),
                name: Some("streamer_tv".to_string()),
            })
        );
        assert_eq!(
            integration.synced_at,
            Some(Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn id_only_payload() {
        let integration = Integration::from_value(json!({ "id": "1" })).unwrap();
        assert!(integration.name.is_none());
        assert!(integration.user.is_none());
        assert!(integration.account.is_none());
        assert!(integration.synced_at.is_none());
    }

    #[test]
    fn nested_user_without_id_fails() {
        let err = Integration::from_value(json!({ "id": "1", "user": { "username": "x" } }))
            .unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }

    #[test]
    fn to_json_uses_wire_names() {
        let integration = Integration::from_value(json!({ "id": "1", "type": "youtube" })).unwrap();
        let json = integration.to_json();
        assert_eq!(json.get("type"), Some(&json!("youtube")));
        assert!(!json.contains_key("kind"));
        assert!(!json.contains_key("name"));
    }
}
