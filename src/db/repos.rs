use async_trait::async_trait;

use crate::{authz::ResourceKind, db::error::DbResult, models::Record};

/// Read access to stored community records.
///
/// Implementations perform no authorization; callers go through
/// [`AccessService`](crate::services::AccessService).
#[async_trait]
pub trait RecordRepo: Send + Sync {
    /// Get a record of `kind` by its ID.
    async fn get_by_id(&self, kind: ResourceKind, id: i64) -> DbResult<Option<Record>>;

    /// List records of `kind`, ordered by ID.
    ///
    /// When `neighborhood_id` is set and the kind is tenant-bearing, only
    /// records in that neighborhood are returned. It is ignored for other
    /// kinds.
    async fn list(
        &self,
        kind: ResourceKind,
        neighborhood_id: Option<i64>,
    ) -> DbResult<Vec<Record>>;
}
