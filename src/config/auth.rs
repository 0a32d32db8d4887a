use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::authz::Role;

/// Authorization configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Where identity fields live in the verified token claims.
    #[serde(default)]
    pub claims: ClaimsConfig,

    /// Map IdP role names to internal role names.
    /// Useful when tokens carry legacy names (e.g. `user = "Resident"`).
    #[serde(default)]
    pub role_mapping: HashMap<String, String>,

    /// Policy knobs applied on top of the standard permission matrix.
    #[serde(default)]
    pub policy: AccessPolicyConfig,

    /// Audit logging configuration for authorization decisions.
    #[serde(default)]
    pub audit: AuthzAuditConfig,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.claims.validate()?;

        for (from, to) in &self.role_mapping {
            if to.parse::<Role>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "auth.role_mapping: '{}' maps to unknown role '{}' \
                     (expected Resident, Admin or SuperAdmin)",
                    from, to
                )));
            }
        }
        Ok(())
    }

    /// Map a role from IdP naming to internal naming.
    pub fn map_role(&self, role: &str) -> String {
        self.role_mapping
            .get(role)
            .cloned()
            .unwrap_or_else(|| role.to_string())
    }
}

/// Claim names used to build an identity from a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClaimsConfig {
    /// Claim holding a nested identity object (e.g. "sub").
    /// If not set, identity claims are read from the top level.
    #[serde(default)]
    pub identity_claim: Option<String>,

    /// Claim containing the numeric principal ID.
    #[serde(default = "default_id_claim")]
    pub id_claim: String,

    /// Claim containing the role name.
    #[serde(default = "default_role_claim")]
    pub role_claim: String,

    /// Claim containing the neighborhood (tenant) ID.
    #[serde(default = "default_tenant_claim")]
    pub tenant_claim: String,
}

impl Default for ClaimsConfig {
    fn default() -> Self {
        Self {
            identity_claim: None,
            id_claim: default_id_claim(),
            role_claim: default_role_claim(),
            tenant_claim: default_tenant_claim(),
        }
    }
}

impl ClaimsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("id_claim", Some(&self.id_claim)),
            ("role_claim", Some(&self.role_claim)),
            ("tenant_claim", Some(&self.tenant_claim)),
            ("identity_claim", self.identity_claim.as_ref()),
        ];
        for (field, value) in names {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(ConfigError::Validation(format!(
                    "auth.claims.{field} cannot be empty"
                )));
            }
        }
        Ok(())
    }
}

fn default_id_claim() -> String {
    "id".to_string()
}

fn default_role_claim() -> String {
    "role".to_string()
}

fn default_tenant_claim() -> String {
    "neighborhood_id".to_string()
}

/// Deliberate extensions to the standard permission matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessPolicyConfig {
    /// Grant SuperAdmin create/update/delete on residents, news and events
    /// in every neighborhood.
    ///
    /// Defaults to false: SuperAdmin oversees tenant data read-only and fully
    /// controls neighborhoods, admin accounts and contact messages.
    #[serde(default)]
    pub superadmin_tenant_writes: bool,
}

/// Configuration for authorization decision audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthzAuditConfig {
    /// Log allowed authorization decisions.
    /// Defaults to false (only denied decisions are logged).
    #[serde(default)]
    pub log_allowed: bool,

    /// Log denied authorization decisions.
    /// Defaults to true for security monitoring.
    #[serde(default = "default_true")]
    pub log_denied: bool,
}

impl Default for AuthzAuditConfig {
    fn default() -> Self {
        Self {
            log_allowed: false,
            log_denied: true,
        }
    }
}

fn default_true() -> bool {
    true
}
