use serde::Deserialize;
use serde::Serialize;

/// A curated list of accounts, referenced by the `list_*` event family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    pub id: i64,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub member_count: Option<u64>,

    #[serde(default)]
    pub subscriber_count: Option<u64>,
}
