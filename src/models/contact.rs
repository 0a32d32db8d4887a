use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub message: String,
    pub date_submitted: DateTime<Utc>,
    /// Submitting resident, if the message was sent while signed in.
    ///
    /// Residents may only create contact messages, so this is never needed
    /// for an ownership check.
    #[serde(default)]
    pub resident_id: Option<i64>,
}
