//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API wire DTOs
//! (which carry `success` flags and request-specific shapes).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse capability tag on a user, used for route-level gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Error for role strings that name no known role.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

/// The set of roles a route group accepts, declared once per group.
///
/// Consumed by a single generic role check in the access gate; routes never
/// duplicate role logic.
#[derive(Debug, Clone, Copy)]
pub struct RequiredRoles(&'static [Role]);

impl RequiredRoles {
    pub const fn new(roles: &'static [Role]) -> Self {
        Self(roles)
    }

    /// Whether `role` is in the accepted set.
    pub fn allows(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

impl fmt::Display for RequiredRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        Ok(())
    }
}

/// Domain user — the principal resolved for an authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// User with password hash (for internal auth flows).
#[derive(Debug, Clone)]
pub struct UserWithPassword {
    pub user: User,
    pub password_hash: String,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — user ID (standard JWT `sub` claim).
    pub sub: String,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"user\"").unwrap(),
            Role::User
        );
    }

    #[test]
    fn required_roles_allows_only_members() {
        const ADMIN_ONLY: RequiredRoles = RequiredRoles::new(&[Role::Admin]);
        assert!(ADMIN_ONLY.allows(Role::Admin));
        assert!(!ADMIN_ONLY.allows(Role::User));

        const EITHER: RequiredRoles = RequiredRoles::new(&[Role::Admin, Role::User]);
        assert!(EITHER.allows(Role::User));
        assert_eq!(EITHER.to_string(), "admin, user");
    }
}
