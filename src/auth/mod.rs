//! Identity model for authenticated requests.
//!
//! Token verification happens upstream. This module turns the verified
//! claims into a closed [`Identity`] record and rejects malformed claims
//! before they reach authorization.

mod error;
mod identity;

pub use error::AuthError;
pub use identity::Identity;
