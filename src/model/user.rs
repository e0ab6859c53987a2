use serde::Deserialize;
use serde::Serialize;

/// An account on the feed. Only `id` is guaranteed by the wire format;
/// everything else depends on how much the server chose to hydrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    /// Unique handle, without the leading `@`
    #[serde(default)]
    pub screen_name: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub protected: bool,

    #[serde(default)]
    pub followers_count: Option<u64>,

    #[serde(default)]
    pub friends_count: Option<u64>,
}
