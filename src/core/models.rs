use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Reserved user id used by the server for `@here` mentions.
pub const BROADCAST_USER_ID: &str = "here";

/// Credentials attached to every outgoing request.
///
/// Not `Serialize`: the secret only leaves the process as a request header.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub user_id: String,
    pub auth_token: String,
}

impl Token {
    #[must_use]
    pub fn new(user_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            auth_token: auth_token.into(),
        }
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("user_id", &self.user_id)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserRef {
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        self.id == BROADCAST_USER_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRef {
    pub url: String,
}

/// A chat message as returned by the server.
///
/// `urls`, `mentions` and `channels` are `None` when the server did not
/// include them and `Some(vec![])` when it evaluated them and found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "rid")]
    pub room_id: String,
    #[serde(rename = "msg")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(
        rename = "parseUrls",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parse_urls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupable: Option<bool>,
    #[serde(rename = "ts", deserialize_with = "epoch_millis")]
    pub timestamp: i64,
    #[serde(rename = "_updatedAt", deserialize_with = "epoch_millis")]
    pub updated_at: i64,
    #[serde(rename = "u")]
    pub sender: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<UrlRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<Vec<UserRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<ChannelRef>>,
}

impl Message {
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    #[must_use]
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.updated_at)
    }

    /// Whether the message mentions the broadcast pseudo-user.
    #[must_use]
    pub fn mentions_broadcast(&self) -> bool {
        self.mentions
            .as_deref()
            .is_some_and(|mentions| mentions.iter().any(UserRef::is_broadcast))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "ts", deserialize_with = "epoch_millis")]
    pub timestamp: i64,
    pub success: bool,
}

/// Accepts either a plain integer or the `{"$date": <millis>}` wrapper some
/// server versions emit.
fn epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(
        untagged,
        expecting = "epoch milliseconds as an integer or {\"$date\": millis}"
    )]
    enum Millis {
        Plain(i64),
        Wrapped {
            #[serde(rename = "$date")]
            date: i64,
        },
    }

    Ok(match Millis::deserialize(deserializer)? {
        Millis::Plain(ms) | Millis::Wrapped { date: ms } => ms,
    })
}
