//! Authorization engine combining the permission matrix and the scope policy.

use std::fmt;

use serde::Serialize;

use super::{
    Action, AuthzError, PermissionMatrix, ResourceKind, ScopePolicy, ScopeStep, ScopedRecord,
};
use crate::{
    auth::Identity,
    config::{AuthConfig, AuthzAuditConfig},
    observability::metrics,
};

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The role may never perform this action on this kind.
    RoleForbidden,
    /// The role may perform the action, but not on this record.
    OutOfScope,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoleForbidden => "role_forbidden",
            Self::OutOfScope => "out_of_scope",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an authorization check. Never partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(*reason),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny(_) => "deny",
        }
    }
}

/// Step-by-step account of one decision, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionTrace {
    pub identity: Identity,
    pub kind: ResourceKind,
    pub action: Action,
    /// Whether the permission matrix admits the action for the role
    pub matrix_permitted: bool,
    /// Scope rule that decided, if the scope policy was consulted
    pub scope_step: Option<ScopeStep>,
    pub decision: Decision,
}

/// Stateless decision function over an immutable matrix and scope policy.
///
/// Cheap to clone and safe to share across threads; no call blocks or does I/O.
#[derive(Debug, Clone, Default)]
pub struct AuthzEngine {
    matrix: PermissionMatrix,
    scope: ScopePolicy,
    audit: AuthzAuditConfig,
}

impl AuthzEngine {
    /// Build the engine from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let tenant_writes = config.policy.superadmin_tenant_writes;
        let matrix = if tenant_writes {
            tracing::warn!(
                "SuperAdmin tenant writes enabled: SuperAdmin may create, update and delete \
                 residents, news and events in every neighborhood"
            );
            PermissionMatrix::with_superadmin_tenant_writes()
        } else {
            PermissionMatrix::standard()
        };

        Self {
            matrix,
            scope: ScopePolicy::new().with_superadmin_tenant_writes(tenant_writes),
            audit: config.audit.clone(),
        }
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    pub fn scope_policy(&self) -> &ScopePolicy {
        &self.scope
    }

    /// Decide whether `identity` may perform `action` on `kind`.
    ///
    /// `target` is the fetched record for single-record Read/Update/Delete,
    /// and `None` for Create and for list reads. List reads must still run
    /// the fetched candidates through [`Self::filter_in_scope`].
    pub fn try_authorize(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        target: Option<&dyn ScopedRecord>,
    ) -> Result<Decision, AuthzError> {
        let (decision, _, _) = self.decide(identity, kind, action, target)?;
        self.record(identity, kind, action, decision);
        Ok(decision)
    }

    /// Infallible form of [`Self::try_authorize`].
    ///
    /// # Panics
    ///
    /// Panics if `target` lacks a field its kind declares. That is an
    /// integration bug in the caller, never a user error.
    pub fn authorize(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        target: Option<&dyn ScopedRecord>,
    ) -> Decision {
        match self.try_authorize(identity, kind, action, target) {
            Ok(decision) => decision,
            Err(e) => panic!("authorization contract violation: {e}"),
        }
    }

    /// Narrow a fetched candidate set to the records `identity` may read.
    ///
    /// Returns nothing when the role may not read `kind` at all.
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
        if !self.matrix.permitted(identity.role(), kind, Action::Read) {
            return Ok(Vec::new());
        }
        let visible = self.scope.try_filter_in_scope(identity, kind, records)?;
        tracing::debug!(
            identity_id = identity.id(),
            role = %identity.role(),
            kind = %kind,
            visible = visible.len(),
            "Filtered candidate set"
        );
        Ok(visible)
    }

    /// Infallible form of [`Self::try_filter_in_scope`].
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

    /// Evaluate a request and report how the decision was reached.
    ///
    /// Produces the same decision as [`Self::try_authorize`] without audit
    /// logging or metrics.
    pub fn explain(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        target: Option<&dyn ScopedRecord>,
    ) -> Result<DecisionTrace, AuthzError> {
        let (decision, matrix_permitted, scope_step) =
            self.decide(identity, kind, action, target)?;
        Ok(DecisionTrace {
            identity: *identity,
            kind,
            action,
            matrix_permitted,
            scope_step,
            decision,
        })
    }

    fn decide(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
        target: Option<&dyn ScopedRecord>,
    ) -> Result<(Decision, bool, Option<ScopeStep>), AuthzError> {
        if !self.matrix.permitted(identity.role(), kind, action) {
            return Ok((Decision::Deny(DenyReason::RoleForbidden), false, None));
        }

        // Nothing stored yet to scope against
        if action == Action::Create {
            return Ok((Decision::Allow, true, None));
        }

        let Some(record) = target else {
            return Ok((Decision::Allow, true, None));
        };

        let step = self.scope.evaluate(identity, kind, action, record)?;
        tracing::debug!(
            identity_id = identity.id(),
            kind = %kind,
            action = %action,
            step = ?step,
            "Scope evaluated"
        );
        let decision = if step.in_scope() {
            Decision::Allow
        } else {
            Decision::Deny(DenyReason::OutOfScope)
        };
        Ok((decision, true, Some(step)))
    }

    fn record(&self, identity: &Identity, kind: ResourceKind, action: Action, decision: Decision) {
        metrics::record_authz_decision(kind, action, decision);

        let log = match decision {
            Decision::Allow => self.audit.log_allowed,
            Decision::Deny(_) => self.audit.log_denied,
        };
        if log {
            tracing::info!(
                target: "neighborly::audit",
                identity_id = identity.id(),
                role = %identity.role(),
                tenant_id = ?identity.tenant_id(),
                kind = %kind,
                action = %action,
                decision = decision.as_str(),
                reason = decision.deny_reason().map(|r| r.as_str()),
                "Authorization decision"
            );
        }
    }
}
