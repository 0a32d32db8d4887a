use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notice broadcast to a neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub description: String,
    pub date_created: DateTime<Utc>,
    pub neighborhood_id: i64,
    /// Resident who raised the notice
    pub resident_id: i64,
}
