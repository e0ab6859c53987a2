use serde::Deserialize;
use serde::Serialize;

/// Notice that a previously delivered status was deleted and must no longer
/// be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDeletionNotice {
    #[serde(rename = "id")]
    pub status_id: i64,

    pub user_id: i64,
}

/// Warning that the client is consuming too slowly and the server-side buffer
/// is filling up. The connection will be dropped if `percent_full` reaches
/// 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StallWarning {
    pub code: String,

    pub message: String,

    pub percent_full: u8,
}
