//! HS256 JWT issuing and validation.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tubely_core::AppError;
use uuid::Uuid;

use crate::auth::models::JwtClaims;

const ISSUER: &str = "tubely-access";

/// Turns a bearer credential into the id of the user it was issued to.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError>;
}

/// JWT service with a shared HS256 secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Issue a token for `user_id`, valid for the configured number of hours.
    pub fn issue_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iss: Some(ISSUER.to_string()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("JWT validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AppError::Unauthorized("Invalid token issuer".to_string())
                }
                _ => AppError::Unauthorized("Couldn't validate JWT".to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

#[async_trait]
impl TokenVerifier for JwtService {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        Ok(self.validate_token(token)?.sub)
    }
}
