//! Signed, stateless bearer credentials.
//!
//! Credentials are HS256 JWTs carrying sub/iss/aud/iat/nbf/exp; issuer and
//! audience are both the service's canonical identity string. Verification
//! checks signature, time window, issuer and audience, and every failure is
//! reported uniformly so callers cannot tell which check tripped.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical identity of this service; used as both issuer and audience.
pub const SERVICE_IDENTITY: &str = "issuetrack";

/// Lifetime of an issued credential.
const CREDENTIAL_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("failed to create credential: {0}")]
    Create(String),

    /// All verification failures collapse into this one variant.
    #[error("invalid or expired authentication credential")]
    Invalid,
}

/// JWT claim set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: Uuid,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id`, valid from now for the default lifetime.
    pub fn new(user_id: Uuid) -> Self {
        Self::with_ttl(user_id, Duration::hours(CREDENTIAL_TTL_HOURS))
    }

    pub fn with_ttl(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Claims {
            sub: user_id,
            iss: SERVICE_IDENTITY.to_string(),
            aud: SERVICE_IDENTITY.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs a claim set into a compact credential string.
pub fn issue_credential(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&header, claims, &key).map_err(|e| JwtError::Create(e.to_string()))
}

/// Verifies a credential and extracts its claims.
///
/// Checks signature, expiry, not-before, issuer and audience.
pub fn verify_credential(credential: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SERVICE_IDENTITY]);
    validation.set_audience(&[SERVICE_IDENTITY]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    let data = decode::<Claims>(credential, &key, &validation).map_err(|_| JwtError::Invalid)?;
    Ok(data.claims)
}
