use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news post, authored by a resident within their neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Author
    pub resident_id: i64,
    pub neighborhood_id: i64,
}
