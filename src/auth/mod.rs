use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

pub mod password;

/// Coarse role carried by every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    Admin,
    ServiceProvider,
    Customer,
}

impl std::str::FromStr for UserType {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserType::Admin),
            "serviceProvider" | "provider" => Ok(UserType::ServiceProvider),
            "customer" => Ok(UserType::Customer),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the identity
    pub sub: String,
    pub id: i32,
    pub name: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    pub exp: i64,
    pub iat: i64,
}

/// Resolved session identity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip)]
    pub user_type: UserType,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.sub,
            name: claims.name,
            user_type: claims.user_type,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    InvalidSecret,
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Unknown user type: {0}")]
    UnknownRole(String),
    #[error("Password hashing error: {0}")]
    Hash(String),
    #[error("JWT expiry must be between 1 and {max} hours, got {0}", max = MAX_EXPIRY_HOURS)]
    InvalidExpiry(u64),
}

/// Upper bound for session lifetime (one year)
pub const MAX_EXPIRY_HOURS: u64 = 24 * 366;

/// Signing material for session tokens, built once at startup.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl SessionKeys {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        Self::from_secret(&security.jwt_secret, security.jwt_expiry_hours)
    }

    pub fn from_secret(secret: &str, expiry_hours: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        if expiry_hours == 0 || expiry_hours > MAX_EXPIRY_HOURS {
            return Err(AuthError::InvalidExpiry(expiry_hours));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn claims(&self, id: i32, email: &str, name: &str, user_type: UserType) -> Claims {
        let now = Utc::now();
        let exp = (now + Duration::hours(self.expiry_hours as i64)).timestamp();

        Claims {
            sub: email.to_string(),
            id,
            name: name.to_string(),
            user_type,
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn expiry_hours(&self) -> u64 {
        self.expiry_hours
    }

    pub fn generate_jwt(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    pub fn validate_jwt(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::from_secret("test-secret", 1).unwrap()
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(
            SessionKeys::from_secret("", 1),
            Err(AuthError::InvalidSecret)
        ));
    }

    #[test]
    fn rejects_out_of_range_expiry() {
        for hours in [0, MAX_EXPIRY_HOURS + 1, u64::MAX] {
            assert!(matches!(
                SessionKeys::from_secret("test-secret", hours),
                Err(AuthError::InvalidExpiry(h)) if h == hours
            ));
        }

        let keys = SessionKeys::from_secret("test-secret", MAX_EXPIRY_HOURS).unwrap();
        let claims = keys.claims(1, "a@example.com", "A", UserType::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_round_trip_keeps_identity() {
        let keys = keys();
        let claims = keys.claims(7, "pat@example.com", "Pat", UserType::ServiceProvider);
        let token = keys.generate_jwt(&claims).unwrap();

        let identity = Identity::from(keys.validate_jwt(&token).unwrap());
        assert_eq!(identity.id, 7);
        assert_eq!(identity.email, "pat@example.com");
        assert_eq!(identity.user_type, UserType::ServiceProvider);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = SessionKeys::from_secret("other-secret", 1).unwrap();
        let claims = other.claims(1, "a@example.com", "A", UserType::Admin);
        let token = other.generate_jwt(&claims).unwrap();

        assert!(keys().validate_jwt(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let mut claims = keys.claims(1, "a@example.com", "A", UserType::Admin);
        claims.exp = Utc::now().timestamp() - 3600;
        let token = keys.generate_jwt(&claims).unwrap();

        assert!(keys.validate_jwt(&token).is_err());
    }

    #[test]
    fn user_type_uses_session_tags() {
        assert_eq!(serde_json::to_value(UserType::ServiceProvider).unwrap(), "serviceProvider");
        assert_eq!("customer".parse::<UserType>().unwrap(), UserType::Customer);
        assert!("root".parse::<UserType>().is_err());
    }
}
