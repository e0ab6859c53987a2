use serde::Deserialize;
use serde::Serialize;

use super::User;

/// One published post. `id` and `text` are required; a status without them is
/// treated as corrupt by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,

    pub text: String,

    #[serde(default)]
    pub user: Option<User>,

    /// Server-side creation timestamp, in the feed's own date format
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub in_reply_to_status_id: Option<i64>,

    #[serde(default)]
    pub lang: Option<String>,
}
