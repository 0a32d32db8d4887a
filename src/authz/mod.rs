//! Authorization core: who may see and touch which community records.
//!
//! Three layers, consulted in order:
//! 1. [`PermissionMatrix`]: can this role ever perform this action on this kind?
//! 2. [`ScopePolicy`]: is this particular record within the identity's
//!    neighborhood and, for residents, their own?
//! 3. [`AuthzEngine`]: combines both into a [`Decision`] before a record is
//!    touched, and filters list results after they are fetched.
//!
//! Everything here is pure and synchronous. Records are fetched by the caller
//! and passed in through the [`ScopedRecord`] trait.

mod engine;
mod error;
mod kinds;
mod matrix;
mod scope;

pub use engine::{AuthzEngine, Decision, DecisionTrace, DenyReason};
pub use error::AuthzError;
pub use kinds::{Action, ResourceKind, Role};
pub use matrix::{ActionSet, PermissionMatrix};
pub use scope::{RecordScope, ScopePolicy, ScopeStep, ScopedRecord};
