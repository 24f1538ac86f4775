use serde::{Deserialize, Serialize};

/// Entry of the auxiliary posts listing.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}
