//! Record-level scope policy: tenant isolation and resident ownership.

use serde::{Deserialize, Serialize};

use super::{Action, AuthzError, ResourceKind, Role, matrix::SUPERADMIN_EXTENSION_KINDS};
use crate::auth::Identity;

/// Fields of a stored record that participate in scoping.
///
/// Implementors return `None` for fields their kind does not carry. Returning
/// `None` for a field the kind *declares* is a contract violation.
pub trait ScopedRecord {
    /// Tenant the record belongs to.
    fn neighborhood_id(&self) -> Option<i64>;

    /// Resident who created or submitted the record.
    fn owner_id(&self) -> Option<i64>;
}

impl<T: ScopedRecord + ?Sized> ScopedRecord for &T {
    fn neighborhood_id(&self) -> Option<i64> {
        (**self).neighborhood_id()
    }

    fn owner_id(&self) -> Option<i64> {
        (**self).owner_id()
    }
}

/// Bare scoping fields, for callers that do not hold a full record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordScope {
    #[serde(default)]
    pub neighborhood_id: Option<i64>,
    #[serde(default)]
    pub owner_id: Option<i64>,
}

impl RecordScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_neighborhood(mut self, neighborhood_id: i64) -> Self {
        self.neighborhood_id = Some(neighborhood_id);
        self
    }

    pub fn owned_by(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

impl ScopedRecord for RecordScope {
    fn neighborhood_id(&self) -> Option<i64> {
        self.neighborhood_id
    }

    fn owner_id(&self) -> Option<i64> {
        self.owner_id
    }
}

/// The rule that decided a scope check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeStep {
    /// SuperAdmin reads everything.
    SuperAdminOversight,
    /// SuperAdmin write on a kind the matrix alone governs.
    SuperAdminWrite,
    /// SuperAdmin write on tenant data without the tenant-write extension.
    SuperAdminRestricted,
    /// Record belongs to another neighborhood.
    TenantMismatch,
    /// Record belongs to another resident.
    OwnerMismatch,
    /// Same neighborhood; no ownership check applied.
    Tenant,
    /// Same neighborhood (when tenant-bearing) and same owner.
    Owner,
    /// Kind carries no record-level restriction.
    Unrestricted,
}

impl ScopeStep {
    pub fn in_scope(&self) -> bool {
        matches!(
            self,
            Self::SuperAdminOversight
                | Self::SuperAdminWrite
                | Self::Tenant
                | Self::Owner
                | Self::Unrestricted
        )
    }
}

/// Decides whether an identity may act on a specific record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopePolicy {
    superadmin_tenant_writes: bool,
}

impl ScopePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let SuperAdmin writes reach residents, news and events.
    pub fn with_superadmin_tenant_writes(mut self, enabled: bool) -> Self {
        self.superadmin_tenant_writes = enabled;
        self
    }

    /// Evaluate the scope rules in order, stopping at the first that decides.
    pub fn evaluate<R: ScopedRecord + ?Sized>(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        record: &R,
    ) -> Result<ScopeStep, AuthzError> {
        if identity.role() == Role::SuperAdmin {
            if action == Action::Read {
                return Ok(ScopeStep::SuperAdminOversight);
            }
            if SUPERADMIN_EXTENSION_KINDS.contains(&kind) && !self.superadmin_tenant_writes {
                return Ok(ScopeStep::SuperAdminRestricted);
            }
            return Ok(ScopeStep::SuperAdminWrite);
        }

        let mut step = ScopeStep::Unrestricted;

        // Tenant before ownership: a resident's own record in another
        // neighborhood stays out of scope.
        if kind.is_tenant_bearing() {
            let neighborhood_id = record.neighborhood_id().ok_or(AuthzError::MissingField {
                kind,
                field: "neighborhood_id",
            })?;
            if identity.tenant_id() != Some(neighborhood_id) {
                return Ok(ScopeStep::TenantMismatch);
            }
            step = ScopeStep::Tenant;
        }

        if kind.is_ownership_bearing() && identity.role() == Role::Resident {
            let owner_id = record.owner_id().ok_or(AuthzError::MissingField {
                kind,
                field: "owner_id",
            })?;
            if owner_id != identity.id() {
                return Ok(ScopeStep::OwnerMismatch);
            }
            step = ScopeStep::Owner;
        }

        Ok(step)
    }

    pub fn try_in_scope<R: ScopedRecord + ?Sized>(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        record: &R,
    ) -> Result<bool, AuthzError> {
        self.evaluate(identity, kind, action, record)
            .map(|step| step.in_scope())
    }

    /// Whether `identity` may perform `action` on `record`.
    ///
    /// # Panics
    ///
    /// Panics if the record lacks a field its kind declares.
    pub fn in_scope<R: ScopedRecord + ?Sized>(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        record: &R,
    ) -> bool {
        match self.try_in_scope(identity, kind, action, record) {
            Ok(in_scope) => in_scope,
            Err(e) => panic!("authorization contract violation: {e}"),
        }
    }

    /// Keep the records `identity` may read.
    pub fn try_filter_in_scope<R, I>(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        records: I,
    ) -> Result<Vec<R>, AuthzError>
    where
        R: ScopedRecord,
        I: IntoIterator<Item = R>,
    {
        let mut visible = Vec::new();
        for record in records {
            if self.try_in_scope(identity, kind, Action::Read, &record)? {
                visible.push(record);
            }
        }
        Ok(visible)
    }

    /// Keep the records `identity` may read.
    ///
    /// # Panics
    ///
    /// Panics if any record lacks a field its kind declares.
    pub fn filter_in_scope<R, I>(&self, identity: &Identity, kind: ResourceKind, records: I) -> Vec<R>
    where
        R: ScopedRecord,
        I: IntoIterator<Item = R>,
    {
        match self.try_filter_in_scope(identity, kind, records) {
            Ok(visible) => visible,
            Err(e) => panic!("authorization contract violation: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn policy() -> ScopePolicy {
        ScopePolicy::new()
    }

    #[test]
    fn test_resident_own_news_in_scope() {
        let resident = Identity::resident(5, 2);
        let own = RecordScope::new().in_neighborhood(2).owned_by(5);
        let other = RecordScope::new().in_neighborhood(2).owned_by(9);

        assert_eq!(
            policy()
                .evaluate(&resident, ResourceKind::News, Action::Update, &own)
                .unwrap(),
            ScopeStep::Owner
        );
        assert_eq!(
            policy()
                .evaluate(&resident, ResourceKind::News, Action::Update, &other)
                .unwrap(),
            ScopeStep::OwnerMismatch
        );
    }

    #[test]
    fn test_tenant_check_precedes_ownership() {
        // Own record that drifted into another neighborhood
        let resident = Identity::resident(5, 2);
        let drifted = RecordScope::new().in_neighborhood(3).owned_by(5);
        assert_eq!(
            policy()
                .evaluate(&resident, ResourceKind::Event, Action::Read, &drifted)
                .unwrap(),
            ScopeStep::TenantMismatch
        );
    }

    #[test]
    fn test_admin_bypasses_ownership_within_tenant() {
        let admin = Identity::admin(1, 2);
        for owner in [1, 5, 9] {
            let record = RecordScope::new().in_neighborhood(2).owned_by(owner);
            assert_eq!(
                policy()
                    .evaluate(&admin, ResourceKind::News, Action::Delete, &record)
                    .unwrap(),
                ScopeStep::Tenant
            );
        }
    }

    #[test]
    fn test_admin_never_crosses_tenant() {
        let admin = Identity::admin(1, 2);
        let record = RecordScope::new().in_neighborhood(3);
        for action in Action::ALL {
            assert!(!policy().in_scope(&admin, ResourceKind::Resident, action, &record));
        }
    }

    #[rstest]
    #[case(ResourceKind::Neighborhood)]
    #[case(ResourceKind::Contact)]
    #[case(ResourceKind::Admin)]
    fn test_non_tenant_kinds_unrestricted_for_admin(#[case] kind: ResourceKind) {
        let admin = Identity::admin(1, 2);
        assert_eq!(
            policy()
                .evaluate(&admin, kind, Action::Read, &RecordScope::new())
                .unwrap(),
            ScopeStep::Unrestricted
        );
    }

    #[test]
    fn test_superadmin_reads_everything() {
        let root = Identity::super_admin(100);
        for kind in ResourceKind::ALL {
            // Fields deliberately absent: SuperAdmin reads never inspect the record
            assert!(policy().in_scope(&root, kind, Action::Read, &RecordScope::new()));
        }
    }

    #[rstest]
    #[case(ResourceKind::Neighborhood, true)]
    #[case(ResourceKind::Admin, true)]
    #[case(ResourceKind::Contact, true)]
    #[case(ResourceKind::Notification, true)]
    #[case(ResourceKind::Resident, false)]
    #[case(ResourceKind::News, false)]
    #[case(ResourceKind::Event, false)]
    fn test_superadmin_writes(#[case] kind: ResourceKind, #[case] expected: bool) {
        let root = Identity::super_admin(100);
        let record = RecordScope::new().in_neighborhood(2).owned_by(5);
        assert_eq!(
            policy().in_scope(&root, kind, Action::Delete, &record),
            expected
        );
        // The extension opens every kind
        assert!(
            policy()
                .with_superadmin_tenant_writes(true)
                .in_scope(&root, kind, Action::Delete, &record)
        );
    }

    #[test]
    fn test_missing_tenant_field_is_contract_violation() {
        let resident = Identity::resident(5, 2);
        let err = policy()
            .try_in_scope(
                &resident,
                ResourceKind::Notification,
                Action::Read,
                &RecordScope::new(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            AuthzError::MissingField {
                kind: ResourceKind::Notification,
                field: "neighborhood_id"
            }
        );
    }

    #[test]
    fn test_missing_owner_field_only_matters_for_residents() {
        let record = RecordScope::new().in_neighborhood(2);
        let admin = Identity::admin(1, 2);
        assert!(
            policy()
                .try_in_scope(&admin, ResourceKind::News, Action::Read, &record)
                .unwrap()
        );

        let resident = Identity::resident(5, 2);
        assert!(matches!(
            policy().try_in_scope(&resident, ResourceKind::News, Action::Read, &record),
            Err(AuthzError::MissingField {
                field: "owner_id",
                ..
            })
        ));
    }

    #[test]
    #[should_panic(expected = "authorization contract violation")]
    fn test_in_scope_panics_on_contract_violation() {
        let resident = Identity::resident(5, 2);
        policy().in_scope(&resident, ResourceKind::News, Action::Read, &RecordScope::new());
    }

    #[test]
    fn test_filter_keeps_order_and_matching_records() {
        let resident = Identity::resident(5, 2);
        let records = vec![
            RecordScope::new().in_neighborhood(2).owned_by(5),
            RecordScope::new().in_neighborhood(2).owned_by(6),
            RecordScope::new().in_neighborhood(3).owned_by(5),
            RecordScope::new().in_neighborhood(2).owned_by(5),
        ];
        let visible = policy().filter_in_scope(&resident, ResourceKind::News, records.clone());
        assert_eq!(visible, vec![records[0], records[3]]);
    }

    #[test]
    fn test_filter_over_references() {
        let admin = Identity::admin(1, 2);
        let records = [
            RecordScope::new().in_neighborhood(2),
            RecordScope::new().in_neighborhood(4),
        ];
        let visible = policy().filter_in_scope(&admin, ResourceKind::Notification, records.iter());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].neighborhood_id, Some(2));
    }
}
