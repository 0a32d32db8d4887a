use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::Identity,
    authz::{Action, AuthzEngine, AuthzError, Decision, DenyReason, ResourceKind},
    db::{DbError, RecordRepo},
    models::Record,
};

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Access denied: {0}")]
    Denied(DenyReason),

    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: i64 },

    /// Create never targets a stored record.
    #[error("{0} cannot be used to fetch a stored record")]
    UnsupportedAction(Action),

    #[error(transparent)]
    Db(#[from] DbError),

    /// A stored record lacks a field its kind requires.
    #[error(transparent)]
    Contract(#[from] AuthzError),
}

impl AccessError {
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}

fn enforce(decision: Decision) -> Result<(), AccessError> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => Err(AccessError::Denied(reason)),
    }
}

/// Authorized access to stored records.
///
/// Checks the role before touching storage, then the fetched record's scope.
/// List results are narrowed to the records the caller may read.
#[derive(Clone)]
pub struct AccessService {
    engine: Arc<AuthzEngine>,
    repo: Arc<dyn RecordRepo>,
}

impl AccessService {
    pub fn new(engine: Arc<AuthzEngine>, repo: Arc<dyn RecordRepo>) -> Self {
        Self { engine, repo }
    }

    pub fn engine(&self) -> &AuthzEngine {
        &self.engine
    }

    /// Check that `identity` may create a record of `kind`.
    ///
    /// The caller stamps the new record with the identity's neighborhood and
    /// ID; nothing is stored here.
    pub fn check_create(&self, identity: &Identity, kind: ResourceKind) -> Result<(), AccessError> {
        enforce(
            self.engine
                .try_authorize(identity, kind, Action::Create, None)?,
        )
    }

    /// Fetch a single record for `action` (Read, Update or Delete).
    ///
    /// Fails with [`AccessError::Denied`] before any lookup when the role may
    /// never perform the action on `kind`, and with
    /// [`AccessError::UnsupportedAction`] for Create.
    pub async fn fetch(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: i64,
        action: Action,
    ) -> Result<Record, AccessError> {
        // The engine skips scope for Create; a stored record always needs it
        if action == Action::Create {
            return Err(AccessError::UnsupportedAction(action));
        }

        if !self.engine.matrix().permitted(identity.role(), kind, action) {
            // Audited through the engine; the decision is a role denial
            return Err(self.deny_unreachable(identity, kind, action));
        }

        let record = self
            .repo
            .get_by_id(kind, id)
            .await?
            .ok_or(AccessError::NotFound { kind, id })?;

        enforce(
            self.engine
                .try_authorize(identity, kind, action, Some(&record))?,
        )?;
        Ok(record)
    }

    /// List the records of `kind` visible to `identity`.
    pub async fn list(
        &self,
        identity: &Identity,
        kind: ResourceKind,
    ) -> Result<Vec<Record>, AccessError> {
        enforce(self.engine.try_authorize(identity, kind, Action::Read, None)?)?;

        // Narrow at the source; the scope filter below stays authoritative
        let candidates = self.repo.list(kind, identity.tenant_id()).await?;
        let fetched = candidates.len();
        let visible = self.engine.try_filter_in_scope(identity, kind, candidates)?;

        if visible.len() != fetched {
            tracing::debug!(
                identity_id = identity.id(),
                kind = %kind,
                fetched,
                visible = visible.len(),
                "Dropped out-of-scope records from listing"
            );
        }
        Ok(visible)
    }

    fn deny_unreachable(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: Action,
    ) -> AccessError {
        match self.engine.try_authorize(identity, kind, action, None) {
            Ok(Decision::Deny(reason)) => AccessError::Denied(reason),
            Ok(Decision::Allow) => AccessError::Denied(DenyReason::RoleForbidden),
            Err(e) => AccessError::Contract(e),
        }
    }
}
