use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod jwt;
pub mod middleware;
pub mod password;

/// User claims for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: Uuid,    // Subject (user ID)
    pub name: String, // Display name
    pub role: String, // User role (user, admin)
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
    pub iss: String,  // Issuer
}

impl Claims {
    pub fn new(user_id: Uuid, name: String, role: String) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::hours(24); // 24 hour expiration

        Self {
            sub: user_id,
            name,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: "marketplace-api".to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str()
    }
}

/// Role-based access levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiration() {
        let claims = Claims::new(Uuid::new_v4(), "test_user".to_string(), "user".to_string());

        assert!(!claims.is_expired());
        assert!(!claims.is_admin());
        assert_eq!(claims.iss, "marketplace-api");
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("USER").unwrap(), Role::User);
        assert!(Role::from_str("superuser").is_err());
        assert_eq!(Role::Admin.as_str(), "admin");
    }
}
