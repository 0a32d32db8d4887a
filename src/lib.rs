//! Authorization core for a multi-tenant community-management API.
//!
//! Residents, neighborhoods (tenants), news, events, contact messages and
//! notifications are guarded by three roles: Resident, Admin and SuperAdmin.
//! This crate decides, for an authenticated [`auth::Identity`], whether an
//! action on a resource kind (and a specific record) is permitted, and
//! narrows list results to the records the identity may see.
//!
//! ```
//! use neighborly::{
//!     auth::Identity,
//!     authz::{Action, AuthzEngine, Decision, DenyReason, RecordScope, ResourceKind},
//! };
//!
//! let engine = AuthzEngine::default();
//! let resident = Identity::resident(5, 2);
//! let theirs = RecordScope::new().in_neighborhood(2).owned_by(9);
//!
//! assert_eq!(
//!     engine.authorize(&resident, ResourceKind::News, Action::Update, Some(&theirs)),
//!     Decision::Deny(DenyReason::OutOfScope),
//! );
//! ```

pub mod auth;
pub mod authz;
pub mod config;
pub mod db;
pub mod models;
pub mod observability;
pub mod services;

#[cfg(test)]
mod tests;
