//! Signed admin access tokens.
//!
//! A token is the only credential an admin request carries. Nothing is
//! stored server-side: the extractor checks signature, issuer and expiry on
//! every request and reads the admin id from the claims.

use chrono::Utc;
use fds_core::types::DbId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `iss` claim stamped on, and required of, every token.
pub const ISSUER: &str = "fds-api";

/// Default token lifetime in minutes (one working day).
pub const DEFAULT_TTL_MINS: i64 = 8 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: DbId,
    pub username: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// Signing secret and lifetime for access tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_mins: i64,
}

impl TokenConfig {
    /// Read `JWT_SECRET` (required) and `JWT_EXPIRY_MINS` (default 480).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or the expiry is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.trim().is_empty(), "JWT_SECRET must be set and non-empty");

        let ttl_mins = match std::env::var("JWT_EXPIRY_MINS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|mins| *mins > 0)
                .expect("JWT_EXPIRY_MINS must be a positive integer"),
            Err(_) => DEFAULT_TTL_MINS,
        };

        Self { secret, ttl_mins }
    }

    /// Lifetime in seconds, as reported to clients in `expires_in`.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_mins * 60
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);
        validation
    }
}

/// Issue a token for `admin_id`, valid for the configured lifetime.
pub fn issue_token(
    admin_id: DbId,
    username: &str,
    config: &TokenConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now().timestamp();
    let claims = Claims {
        sub: admin_id,
        username: username.to_owned(),
        iss: ISSUER.to_owned(),
        iat: issued_at,
        exp: issued_at + config.ttl_secs(),
        jti: Uuid::new_v4(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token and return its claims.
pub fn verify_token(token: &str, config: &TokenConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &TokenConfig::validation(),
    )
    .map(|data| data.claims)
}
