//! Authorization errors.
//!
//! These are contract violations by the calling code, not user-facing denials.
//! Denials are ordinary [`super::Decision`] values.

use thiserror::Error;

use super::ResourceKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    #[error("Invalid {what}: '{value}'")]
    InvalidEnum { what: &'static str, value: String },

    #[error("{kind} record is missing required field '{field}'")]
    MissingField {
        kind: ResourceKind,
        field: &'static str,
    },
}

impl AuthzError {
    pub fn invalid_enum(what: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnum {
            what,
            value: value.into(),
        }
    }
}
