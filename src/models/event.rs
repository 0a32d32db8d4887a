use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled neighborhood event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub neighborhood_id: i64,
    /// Organizer
    pub resident_id: i64,
}
