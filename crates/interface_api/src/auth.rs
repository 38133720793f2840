//! Authentication and authorization
//!
//! Callers authenticate with an HS256 bearer token. Role names are
//! normalised to upper case on validation, so `customer_read` and
//! `CUSTOMER_READ` grant the same permission.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID); recorded as the auditor of writes
    pub sub: String,
    /// User's roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token and normalises its roles
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    let mut claims = token_data.claims;
    claims.roles = claims.roles.iter().map(|r| r.trim().to_uppercase()).collect();
    Ok(claims)
}

/// Checks if user has required role; `ADMIN` grants every permission
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims
        .roles
        .iter()
        .any(|r| r == required_role || r == permissions::ADMIN)
}

/// Fails with `AuthError::MissingPermission` unless the user has the role
pub fn require_role(claims: &Claims, required_role: &str) -> Result<(), AuthError> {
    if has_role(claims, required_role) {
        Ok(())
    } else {
        Err(AuthError::MissingPermission(required_role.to_string()))
    }
}

/// Permission definitions
pub mod permissions {
    pub const CUSTOMER_READ: &str = "CUSTOMER_READ";
    pub const CUSTOMER_WRITE: &str = "CUSTOMER_WRITE";
    pub const ADMIN: &str = "ADMIN";
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_roundtrip_normalises_roles() {
        let token = create_token(
            "00u1okta",
            vec!["customer_read".to_string(), " Customer_Write ".to_string()],
            SECRET,
            60,
        )
        .unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "00u1okta");
        assert_eq!(claims.roles, vec!["CUSTOMER_READ", "CUSTOMER_WRITE"]);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token("user", vec![], SECRET, 60).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now();
        let claims = Claims {
            sub: "user".to_string(),
            roles: vec![],
            exp: (now - Duration::hours(1)).timestamp(),
            iat: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_admin_grants_everything() {
        let claims = Claims {
            sub: "root".to_string(),
            roles: vec![permissions::ADMIN.to_string()],
            exp: 0,
            iat: 0,
        };
        assert!(has_role(&claims, permissions::CUSTOMER_WRITE));
        assert!(require_role(&claims, permissions::CUSTOMER_READ).is_ok());
    }

    #[test]
    fn test_missing_role() {
        let claims = Claims {
            sub: "reader".to_string(),
            roles: vec![permissions::CUSTOMER_READ.to_string()],
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            require_role(&claims, permissions::CUSTOMER_WRITE),
            Err(AuthError::MissingPermission(ref p)) if p == "CUSTOMER_WRITE"
        ));
    }
}
