use serde::Serialize;
use serde_json::Value;

use super::AuthError;
use crate::{authz::Role, config::AuthConfig};

/// The authenticated principal of one request.
///
/// Built once at the trust boundary and immutable afterwards. Residents and
/// admins always carry a tenant; a SuperAdmin never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    id: i64,
    role: Role,
    tenant_id: Option<i64>,
}

impl Identity {
    /// Build an identity, enforcing the tenant invariant.
    ///
    /// A tenant passed for a SuperAdmin is dropped: SuperAdmin scope is global.
    pub fn new(id: i64, role: Role, tenant_id: Option<i64>) -> Result<Self, AuthError> {
        match (role, tenant_id) {
            (Role::SuperAdmin, _) => Ok(Self {
                id,
                role,
                tenant_id: None,
            }),
            (_, Some(tenant_id)) => Ok(Self {
                id,
                role,
                tenant_id: Some(tenant_id),
            }),
            (_, None) => Err(AuthError::MissingTenant {
                role: role.to_string(),
                id,
            }),
        }
    }

    pub fn resident(id: i64, neighborhood_id: i64) -> Self {
        Self {
            id,
            role: Role::Resident,
            tenant_id: Some(neighborhood_id),
        }
    }

    pub fn admin(id: i64, neighborhood_id: i64) -> Self {
        Self {
            id,
            role: Role::Admin,
            tenant_id: Some(neighborhood_id),
        }
    }

    pub fn super_admin(id: i64) -> Self {
        Self {
            id,
            role: Role::SuperAdmin,
            tenant_id: None,
        }
    }

    /// Build an identity from already-verified token claims.
    ///
    /// Claim names come from `config.claims`. When `identity_claim` is set the
    /// id/role/tenant claims are read from the object nested under it (tokens
    /// minted with `{"sub": {"id": 5, "role": "Resident"}}`). Role names pass
    /// through `config.role_mapping` before parsing.
    pub fn from_claims(claims: &Value, config: &AuthConfig) -> Result<Self, AuthError> {
        let names = &config.claims;
        let mut root = claims.as_object().ok_or(AuthError::MalformedClaims)?;
        if let Some(nested) = &names.identity_claim {
            root = root
                .get(nested)
                .ok_or_else(|| AuthError::MissingClaim(nested.clone()))?
                .as_object()
                .ok_or_else(|| AuthError::invalid_claim(nested, "expected an object"))?;
        }

        let id = match root.get(&names.id_claim) {
            Some(value) => integer_claim(&names.id_claim, value)?,
            None => return Err(AuthError::MissingClaim(names.id_claim.clone())),
        };

        let raw_role = root
            .get(&names.role_claim)
            .ok_or_else(|| AuthError::MissingClaim(names.role_claim.clone()))?
            .as_str()
            .ok_or_else(|| AuthError::invalid_claim(&names.role_claim, "expected a string"))?;
        let mapped = config.map_role(raw_role);
        let role: Role = mapped
            .parse()
            .map_err(|_| AuthError::UnknownRole(mapped.clone()))?;

        let tenant_id = match root.get(&names.tenant_claim) {
            None | Some(Value::Null) => None,
            Some(value) => Some(integer_claim(&names.tenant_claim, value)?),
        };

        let identity = Self::new(id, role, tenant_id)?;
        tracing::debug!(
            identity_id = identity.id,
            role = %identity.role,
            tenant_id = ?identity.tenant_id,
            "Identity built from claims"
        );
        Ok(identity)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Neighborhood this identity is confined to; `None` only for SuperAdmin.
    pub fn tenant_id(&self) -> Option<i64> {
        self.tenant_id
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// Accept JSON integers and numeric strings (`sub` is often a string).
fn integer_claim(claim: &str, value: &Value) -> Result<i64, AuthError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| AuthError::invalid_claim(claim, "expected an integer")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| AuthError::invalid_claim(claim, "expected an integer")),
        _ => Err(AuthError::invalid_claim(claim, "expected an integer")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::ClaimsConfig;

    fn config() -> AuthConfig {
        AuthConfig::default()
    }

    #[test]
    fn test_new_requires_tenant_below_superadmin() {
        assert_eq!(
            Identity::new(5, Role::Resident, None).unwrap_err(),
            AuthError::MissingTenant {
                role: "Resident".to_string(),
                id: 5
            }
        );
        assert!(Identity::new(1, Role::Admin, None).is_err());
        assert_eq!(
            Identity::new(5, Role::Resident, Some(2)).unwrap(),
            Identity::resident(5, 2)
        );
    }

    #[test]
    fn test_superadmin_tenant_dropped() {
        let identity = Identity::new(100, Role::SuperAdmin, Some(4)).unwrap();
        assert_eq!(identity.tenant_id(), None);
        assert!(identity.is_super_admin());
    }

    #[test]
    fn test_from_flat_claims() {
        let claims = json!({"id": 5, "role": "Resident", "neighborhood_id": 2, "exp": 1700000000});
        let identity = Identity::from_claims(&claims, &config()).unwrap();
        assert_eq!(identity, Identity::resident(5, 2));
    }

    #[test]
    fn test_from_nested_claims_with_string_ids() {
        let mut config = config();
        config.claims.identity_claim = Some("sub".to_string());
        let claims = json!({
            "sub": {"id": "1", "role": "Admin", "neighborhood_id": "3"},
            "fresh": false
        });
        let identity = Identity::from_claims(&claims, &config).unwrap();
        assert_eq!(identity, Identity::admin(1, 3));
    }

    #[test]
    fn test_custom_claim_names() {
        let mut config = config();
        config.claims = ClaimsConfig {
            identity_claim: None,
            id_claim: "uid".to_string(),
            role_claim: "r".to_string(),
            tenant_claim: "tenant".to_string(),
        };
        let claims = json!({"uid": 9, "r": "SuperAdmin"});
        assert_eq!(
            Identity::from_claims(&claims, &config).unwrap(),
            Identity::super_admin(9)
        );
    }

    #[test]
    fn test_role_mapping_applied() {
        let mut config = config();
        config
            .role_mapping
            .insert("user".to_string(), "Resident".to_string());
        let claims = json!({"id": 5, "role": "user", "neighborhood_id": 2});
        assert_eq!(
            Identity::from_claims(&claims, &config).unwrap().role(),
            Role::Resident
        );
    }

    #[test]
    fn test_claim_errors() {
        let config = config();

        assert_eq!(
            Identity::from_claims(&json!("token"), &config).unwrap_err(),
            AuthError::MalformedClaims
        );
        assert_eq!(
            Identity::from_claims(&json!({"role": "Admin"}), &config).unwrap_err(),
            AuthError::MissingClaim("id".to_string())
        );
        assert_eq!(
            Identity::from_claims(&json!({"id": 1}), &config).unwrap_err(),
            AuthError::MissingClaim("role".to_string())
        );
        assert_eq!(
            Identity::from_claims(&json!({"id": 1, "role": "Mayor"}), &config).unwrap_err(),
            AuthError::UnknownRole("Mayor".to_string())
        );
        assert!(matches!(
            Identity::from_claims(&json!({"id": 1.5, "role": "Admin"}), &config),
            Err(AuthError::InvalidClaim { .. })
        ));
        assert!(matches!(
            Identity::from_claims(&json!({"id": 1, "role": 7}), &config),
            Err(AuthError::InvalidClaim { .. })
        ));
        assert!(matches!(
            Identity::from_claims(
                &json!({"id": 1, "role": "Admin", "neighborhood_id": null}),
                &config
            ),
            Err(AuthError::MissingTenant { .. })
        ));
    }

    #[test]
    fn test_nested_claim_must_be_object() {
        let mut config = config();
        config.claims.identity_claim = Some("sub".to_string());
        assert_eq!(
            Identity::from_claims(&json!({"id": 1}), &config).unwrap_err(),
            AuthError::MissingClaim("sub".to_string())
        );
        assert!(matches!(
            Identity::from_claims(&json!({"sub": "5"}), &config),
            Err(AuthError::InvalidClaim { .. })
        ));
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(Identity::admin(1, 2)).unwrap();
        assert_eq!(value, json!({"id": 1, "role": "Admin", "tenant_id": 2}));
    }
}
