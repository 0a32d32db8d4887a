use serde::{Deserialize, Serialize};

use crate::authz::Role;

/// A registered account.
///
/// Admin accounts are residents whose role is [`Role::Admin`]; they are
/// addressed as [`ResourceKind::Admin`](crate::authz::ResourceKind::Admin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    /// Unset only for SuperAdmin accounts
    #[serde(default)]
    pub neighborhood_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Resident
}

impl Resident {
    /// Whether this account is an administrator account rather than an
    /// ordinary resident.
    pub fn is_admin_account(&self) -> bool {
        self.role != Role::Resident
    }
}
