use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,

    pub email: String,

    #[serde(default)]
    pub created_at: i64,
}
