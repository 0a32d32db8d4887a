//! In-memory record store.
//!
//! Backed by `DashMap` for concurrent access. Suitable for tests, the CLI and
//! embedding applications that load their data up front.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use super::{DbError, DbResult, RecordRepo};
use crate::{
    authz::{ResourceKind, ScopedRecord},
    models::Record,
};

/// Both kinds an account row can be addressed as.
const ACCOUNT_KINDS: [ResourceKind; 2] = [ResourceKind::Resident, ResourceKind::Admin];

#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordRepo {
    records: Arc<DashMap<(ResourceKind, i64), Record>>,
}

impl InMemoryRecordRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `records`, failing on the first invalid one.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> DbResult<Self> {
        let repo = Self::new();
        for record in records {
            repo.insert(record)?;
        }
        Ok(repo)
    }

    /// Store a record, returning the one it replaced, if any.
    ///
    /// Tenant-bearing records must carry a neighborhood. An account row
    /// replaces its previous version even when its role moved it between
    /// [`ResourceKind::Resident`] and [`ResourceKind::Admin`].
    pub fn insert(&self, record: impl Into<Record>) -> DbResult<Option<Record>> {
        let record = record.into();
        let kind = record.kind();
        let id = record.id();

        if kind.is_tenant_bearing() && record.neighborhood_id().is_none() {
            return Err(DbError::Validation(format!(
                "{kind} {id} must belong to a neighborhood"
            )));
        }

        let mut replaced = None;
        if let Record::Resident(_) = record {
            for other in ACCOUNT_KINDS.into_iter().filter(|k| *k != kind) {
                if let Some((_, previous)) = self.records.remove(&(other, id)) {
                    replaced = Some(previous);
                }
            }
        }

        Ok(self.records.insert((kind, id), record).or(replaced))
    }

    pub fn remove(&self, kind: ResourceKind, id: i64) -> Option<Record> {
        self.records.remove(&(kind, id)).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordRepo for InMemoryRecordRepo {
    async fn get_by_id(&self, kind: ResourceKind, id: i64) -> DbResult<Option<Record>> {
        Ok(self.records.get(&(kind, id)).map(|entry| entry.value().clone()))
    }

    async fn list(
        &self,
        kind: ResourceKind,
        neighborhood_id: Option<i64>,
    ) -> DbResult<Vec<Record>> {
        let tenant = neighborhood_id.filter(|_| kind.is_tenant_bearing());
        let mut records: Vec<Record> = self
            .records
            .iter()
            .filter(|entry| entry.key().0 == kind)
            .filter(|entry| tenant.is_none() || entry.value().neighborhood_id() == tenant)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(Record::id);
        Ok(records)
    }
}
