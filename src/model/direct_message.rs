use serde::Deserialize;
use serde::Serialize;

use super::User;

/// A private message between two accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: i64,

    pub text: String,

    #[serde(default)]
    pub sender_id: Option<i64>,

    #[serde(default)]
    pub recipient_id: Option<i64>,

    #[serde(default)]
    pub sender: Option<User>,

    #[serde(default)]
    pub recipient: Option<User>,

    #[serde(default)]
    pub created_at: Option<String>,
}
