//! Session tokens (HS256 JWT)

use std::time::Duration;

use chrono::{DateTime, Utc};
use jwt_compact::alg::{Hs256, Hs256Key};
use jwt_compact::prelude::*;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Custom claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub role: String,
}

/// Why a presented token was not accepted
#[derive(Debug, thiserror::Error)]
pub enum TokenRejection {
    #[error("malformed token: {0}")]
    Malformed(#[from] jwt_compact::ParseError),

    #[error("invalid token: {0}")]
    Invalid(#[from] jwt_compact::ValidationError),
}

/// Signs and verifies session tokens with a shared secret
pub struct TokenIssuer {
    key: Hs256Key,
    ttl: chrono::Duration,
    time_options: TimeOptions,
}

impl TokenIssuer {
    pub fn new(secret: &SecretString, ttl: Duration) -> Result<Self, AuthError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|e| AuthError::Token(e.to_string()))?;

        Ok(Self {
            key: Hs256Key::new(secret.expose_secret().as_bytes()),
            ttl,
            time_options: TimeOptions::new(chrono::Duration::zero(), Utc::now as fn() -> DateTime<Utc>),
        })
    }

    /// Replace the clock used for issuance and expiration checks
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.time_options = TimeOptions::new(chrono::Duration::zero(), clock);
        self
    }

    /// Sign a token for the given user
    pub fn issue(&self, email: &str, role: &str) -> Result<String, AuthError> {
        let claims = Claims::new(SessionClaims {
            email: email.to_owned(),
            role: role.to_owned(),
        })
        .set_duration_and_issuance(&self.time_options, self.ttl);

        Hs256
            .token(&Header::empty(), &claims, &self.key)
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Check signature and expiration, returning the session claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenRejection> {
        let untrusted = UntrustedToken::new(token)?;
        let token = Hs256.validator::<SessionClaims>(&self.key).validate(&untrusted)?;
        let claims = token.claims().validate_expiration(&self.time_options)?;

        Ok(claims.custom.clone())
    }
}
