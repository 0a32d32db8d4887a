//! Static role x resource-kind permission table.
//!
//! The matrix answers one question: is this action category ever reachable
//! by this role for this kind? Whether a particular record is reachable
//! ("own" / "tenant") is decided by [`super::ScopePolicy`].

use std::fmt;

use super::{Action, ResourceKind, Role};

/// Set of [`Action`]s packed into the low four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const NONE: ActionSet = ActionSet(0);
    pub const CRUD: ActionSet = ActionSet(0b1111);

    pub const fn of(actions: &[Action]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < actions.len() {
            bits |= 1 << (actions[i] as u8);
            i += 1;
        }
        ActionSet(bits)
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(|a| self.contains(*a))
    }
}

impl fmt::Display for ActionSet {
    /// Renders as `C,R,U,D` initials, or `-` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let initials: Vec<String> = self.iter().map(|a| a.initial().to_string()).collect();
        f.write_str(&initials.join(","))
    }
}

const ROLES: usize = Role::ALL.len();
const KINDS: usize = ResourceKind::ALL.len();

use Action::{Create, Delete, Read, Update};

/// Rows follow [`ResourceKind::ALL`], columns follow [`Role::ALL`].
const STANDARD: [[ActionSet; ROLES]; KINDS] = [
    // Neighborhood
    [ActionSet::NONE, ActionSet::of(&[Read]), ActionSet::CRUD],
    // Resident
    [
        ActionSet::of(&[Read]),
        ActionSet::CRUD,
        ActionSet::of(&[Read]),
    ],
    // News
    [ActionSet::CRUD, ActionSet::CRUD, ActionSet::of(&[Read])],
    // Event
    [ActionSet::CRUD, ActionSet::CRUD, ActionSet::of(&[Read])],
    // Contact
    [
        ActionSet::of(&[Create]),
        ActionSet::of(&[Read, Update]),
        ActionSet::CRUD,
    ],
    // Notification
    [
        ActionSet::of(&[Read, Delete]),
        ActionSet::of(&[Read, Delete]),
        ActionSet::of(&[Read, Delete]),
    ],
    // Admin
    [ActionSet::NONE, ActionSet::NONE, ActionSet::CRUD],
];

/// Kinds whose writes SuperAdmin only gets through the tenant-write extension.
pub(crate) const SUPERADMIN_EXTENSION_KINDS: [ResourceKind; 3] = [
    ResourceKind::Resident,
    ResourceKind::News,
    ResourceKind::Event,
];

/// Immutable permission table, built once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionMatrix {
    table: [[ActionSet; ROLES]; KINDS],
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

impl PermissionMatrix {
    /// The standard table: SuperAdmin oversees everything read-only and
    /// fully controls neighborhoods, admin accounts and contact messages.
    pub const fn standard() -> Self {
        Self { table: STANDARD }
    }

    /// Standard table plus SuperAdmin Create/Update/Delete on residents,
    /// news and events.
    pub fn with_superadmin_tenant_writes() -> Self {
        let mut matrix = Self::standard();
        for kind in SUPERADMIN_EXTENSION_KINDS {
            matrix.table[kind.index()][Role::SuperAdmin.index()] = ActionSet::CRUD;
        }
        matrix
    }

    /// Whether `role` may ever perform `action` on `kind`.
    pub fn permitted(&self, role: Role, kind: ResourceKind, action: Action) -> bool {
        self.allowed_actions(role, kind).contains(action)
    }

    pub fn allowed_actions(&self, role: Role, kind: ResourceKind) -> ActionSet {
        self.table[kind.index()][role.index()]
    }
}

impl fmt::Display for PermissionMatrix {
    /// Renders the table with one row per kind and one column per role.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<14}", "Kind \\ Role")?;
        for role in Role::ALL {
            write!(f, "{:<12}", role.as_str())?;
        }
        writeln!(f)?;
        for kind in ResourceKind::ALL {
            write!(f, "{:<14}", kind.as_str())?;
            for role in Role::ALL {
                write!(f, "{:<12}", self.allowed_actions(role, kind).to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn set(s: &str) -> ActionSet {
        let mut set = ActionSet::NONE;
        for c in s.chars() {
            set.insert(match c {
                'C' => Create,
                'R' => Read,
                'U' => Update,
                'D' => Delete,
                _ => panic!("bad action initial {c}"),
            });
        }
        set
    }

    #[rstest]
    #[case(ResourceKind::Neighborhood, "", "R", "CRUD")]
    #[case(ResourceKind::Resident, "R", "CRUD", "R")]
    #[case(ResourceKind::News, "CRUD", "CRUD", "R")]
    #[case(ResourceKind::Event, "CRUD", "CRUD", "R")]
    #[case(ResourceKind::Contact, "C", "RU", "CRUD")]
    #[case(ResourceKind::Notification, "RD", "RD", "RD")]
    #[case(ResourceKind::Admin, "", "", "CRUD")]
    fn test_standard_table(
        #[case] kind: ResourceKind,
        #[case] resident: &str,
        #[case] admin: &str,
        #[case] super_admin: &str,
    ) {
        let matrix = PermissionMatrix::standard();
        assert_eq!(matrix.allowed_actions(Role::Resident, kind), set(resident));
        assert_eq!(matrix.allowed_actions(Role::Admin, kind), set(admin));
        assert_eq!(
            matrix.allowed_actions(Role::SuperAdmin, kind),
            set(super_admin)
        );
    }

    #[test]
    fn test_superadmin_reads_every_kind() {
        let matrix = PermissionMatrix::standard();
        for kind in ResourceKind::ALL {
            assert!(matrix.permitted(Role::SuperAdmin, kind, Read), "{kind}");
        }
    }

    #[test]
    fn test_tenant_write_extension_only_touches_superadmin() {
        let standard = PermissionMatrix::standard();
        let extended = PermissionMatrix::with_superadmin_tenant_writes();

        for kind in ResourceKind::ALL {
            for role in [Role::Resident, Role::Admin] {
                assert_eq!(
                    standard.allowed_actions(role, kind),
                    extended.allowed_actions(role, kind)
                );
            }
        }
        for kind in SUPERADMIN_EXTENSION_KINDS {
            assert_eq!(
                extended.allowed_actions(Role::SuperAdmin, kind),
                ActionSet::CRUD
            );
        }
        // Kinds outside the extension are untouched
        assert_eq!(
            extended.allowed_actions(Role::SuperAdmin, ResourceKind::Notification),
            set("RD")
        );
    }

    #[test]
    fn test_action_set_display() {
        assert_eq!(ActionSet::CRUD.to_string(), "C,R,U,D");
        assert_eq!(ActionSet::of(&[Delete, Read]).to_string(), "R,D");
        assert_eq!(ActionSet::NONE.to_string(), "-");
    }

    #[test]
    fn test_matrix_display_has_row_per_kind() {
        let rendered = PermissionMatrix::standard().to_string();
        assert_eq!(rendered.lines().count(), 1 + ResourceKind::ALL.len());
        assert!(rendered.contains("Notification"));
        assert!(rendered.contains("SuperAdmin"));
    }
}
