//! JWT service for signed session tokens
//!
//! Tokens are signed with HS256 using a process-wide secret and carry
//! the user's public fields; the password hash is never encoded.

use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::models::{Role, User};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret, shared process-wide
    pub secret: String,
    /// Token expiration time in seconds (default: 24 hours)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret (required)
    /// - `JWT_TOKEN_EXPIRY`: token expiry in seconds (default: 86400)
    pub fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = env::var("JWT_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// Claims encoded into a signed token: the caller's public fields
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User name
    pub name: String,
    /// User email
    pub email: String,
    /// User role
    pub role: Role,
    /// Reviewer flag
    pub reviewer: bool,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service from the application configuration
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a signed token for a user
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            reviewer: user.reviewer,
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify a token and return the claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn test_service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            token_expiry: 3600,
        })
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Anne".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 16).unwrap(),
            email: "anne@example.com".to_string(),
            password_hash: "$argon2id$irrelevant".to_string(),
            role: Role::Admin,
            reviewer: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let service = test_service("test-secret");
        let user = test_user();

        let token = service.generate_token(&user).expect("failed to sign");
        let claims = service.verify_token(&token).expect("failed to verify");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_never_encodes_password_hash() {
        let service = test_service("test-secret");
        let user = test_user();

        let token = service.generate_token(&user).expect("failed to sign");
        assert!(!token.contains("argon2"));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let signer = test_service("one-secret");
        let verifier = test_service("another-secret");

        let token = signer.generate_token(&test_user()).expect("failed to sign");
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_service("test-secret");
        let user = test_user();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            reviewer: user.reviewer,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("failed to sign");

        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = test_service("test-secret");
        assert!(service.verify_token("not-a-token").is_err());
    }
}
