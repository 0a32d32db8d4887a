//! Closed enumerations the authorization core operates on.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::AuthzError;

/// Role carried by an authenticated identity.
///
/// Ordered by authority for scope purposes (`SuperAdmin > Admin > Resident`).
/// Permissions are *not* monotonic in this order; see [`super::PermissionMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Resident,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Resident, Role::Admin, Role::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "Resident",
            Self::Admin => "Admin",
            Self::SuperAdmin => "SuperAdmin",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| AuthzError::invalid_enum("role", s))
    }
}

/// Kind of resource a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Neighborhood,
    Resident,
    News,
    Event,
    Contact,
    Notification,
    Admin,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Neighborhood,
        ResourceKind::Resident,
        ResourceKind::News,
        ResourceKind::Event,
        ResourceKind::Contact,
        ResourceKind::Notification,
        ResourceKind::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neighborhood => "Neighborhood",
            Self::Resident => "Resident",
            Self::News => "News",
            Self::Event => "Event",
            Self::Contact => "Contact",
            Self::Notification => "Notification",
            Self::Admin => "Admin",
        }
    }

    /// Whether records of this kind carry a `neighborhood_id`.
    pub fn is_tenant_bearing(&self) -> bool {
        matches!(
            self,
            Self::Resident | Self::News | Self::Event | Self::Notification
        )
    }

    /// Whether records of this kind carry an `owner_id` that narrows
    /// scope for residents.
    pub fn is_ownership_bearing(&self) -> bool {
        matches!(self, Self::News | Self::Event | Self::Contact)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AuthzError;

    /// Parses the canonical name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AuthzError::invalid_enum("resource kind", s))
    }
}

/// Action a request performs on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Read => "Read",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    /// Single-letter abbreviation used when rendering the matrix.
    pub fn initial(&self) -> char {
        match self {
            Self::Create => 'C',
            Self::Read => 'R',
            Self::Update => 'U',
            Self::Delete => 'D',
        }
    }

    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Read)
    }

    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    /// Accepts the canonical name case-insensitively, plus the HTTP verbs
    /// request handlers map to actions (`GET`, `POST`, `PUT`, `PATCH`, `DELETE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(action) = Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
        {
            return Ok(action);
        }
        match s {
            "GET" => Ok(Self::Read),
            "POST" => Ok(Self::Create),
            "PUT" | "PATCH" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AuthzError::invalid_enum("action", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!("Resident".parse::<Role>().unwrap(), Role::Resident);
        assert_eq!("SuperAdmin".parse::<Role>().unwrap(), Role::SuperAdmin);
        // Roles come from signed claims; no case folding
        assert!("admin".parse::<Role>().is_err());
        assert!("Janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_authority_order() {
        assert!(Role::SuperAdmin > Role::Admin);
        assert!(Role::Admin > Role::Resident);
    }

    #[test]
    fn test_kind_parse_case_insensitive() {
        assert_eq!("news".parse::<ResourceKind>().unwrap(), ResourceKind::News);
        assert_eq!(
            "NOTIFICATION".parse::<ResourceKind>().unwrap(),
            ResourceKind::Notification
        );
        let err = "gossip".parse::<ResourceKind>().unwrap_err();
        assert!(matches!(err, AuthzError::InvalidEnum { .. }));
        assert!(err.to_string().contains("gossip"));
    }

    #[test]
    fn test_kind_static_facts() {
        let tenant: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|k| k.is_tenant_bearing())
            .collect();
        assert_eq!(
            tenant,
            vec![
                ResourceKind::Resident,
                ResourceKind::News,
                ResourceKind::Event,
                ResourceKind::Notification
            ]
        );

        let owned: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|k| k.is_ownership_bearing())
            .collect();
        assert_eq!(
            owned,
            vec![ResourceKind::News, ResourceKind::Event, ResourceKind::Contact]
        );
    }

    #[test]
    fn test_action_parse_http_verbs() {
        assert_eq!("GET".parse::<Action>().unwrap(), Action::Read);
        assert_eq!("POST".parse::<Action>().unwrap(), Action::Create);
        assert_eq!("PUT".parse::<Action>().unwrap(), Action::Update);
        assert_eq!("PATCH".parse::<Action>().unwrap(), Action::Update);
        assert_eq!("DELETE".parse::<Action>().unwrap(), Action::Delete);
        assert_eq!("update".parse::<Action>().unwrap(), Action::Update);
        assert!("HEAD".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_bits_are_distinct() {
        let mut seen = 0u8;
        for action in Action::ALL {
            assert_eq!(seen & action.bit(), 0);
            seen |= action.bit();
        }
        assert_eq!(seen, 0b1111);
    }
}
