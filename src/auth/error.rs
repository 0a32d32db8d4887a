use thiserror::Error;

/// Failures turning verified token claims into an [`super::Identity`].
///
/// The token itself was already verified upstream; these errors mean its
/// claims do not describe a usable principal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Claims payload is not a JSON object
    #[error("Token claims must be a JSON object")]
    MalformedClaims,

    #[error("Required claim '{0}' is missing")]
    MissingClaim(String),

    #[error("Claim '{claim}' has an invalid value: {reason}")]
    InvalidClaim { claim: String, reason: String },

    /// Role claim (after mapping) is not a known role
    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    /// Residents and admins must belong to a neighborhood
    #[error("{role} identity {id} has no neighborhood")]
    MissingTenant { role: String, id: i64 },
}

impl AuthError {
    pub fn invalid_claim(claim: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidClaim {
            claim: claim.into(),
            reason: reason.into(),
        }
    }
}
