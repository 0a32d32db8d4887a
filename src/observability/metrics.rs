//! Metrics for authorization decisions.
//!
//! Recording goes through the `metrics` facade; the embedding application
//! installs whatever recorder/exporter it uses. Without the `metrics`
//! feature every function here is a no-op.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::authz::{Action, Decision, ResourceKind};

/// Record one authorization decision.
///
/// Labels are bounded enums only; identities and record contents are never
/// used as labels.
pub fn record_authz_decision(kind: ResourceKind, action: Action, decision: Decision) {
    #[cfg(feature = "metrics")]
    {
        let outcome = match decision.deny_reason() {
            None => "allow",
            Some(reason) => reason.as_str(),
        };
        counter!(
            "neighborly_authz_decisions_total",
            "kind" => kind.as_str(),
            "action" => action.as_str(),
            "outcome" => outcome
        )
        .increment(1);
    }
    #[cfg(not(feature = "metrics"))]
    {
        let _ = (kind, action, decision);
    }
}
