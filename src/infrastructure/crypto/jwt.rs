//! JWT token handling

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// One week, in milliseconds
pub const DEFAULT_EXPIRATION_MS: i64 = 604_800_000;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in milliseconds
    pub expiration_ms: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_ms: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_ms,
        }
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Expired JWT token")]
    Expired,
    #[error("Invalid JWT signature")]
    InvalidSignature,
    #[error("Invalid JWT token")]
    Malformed,
    #[error("Unsupported JWT token")]
    UnsupportedAlgorithm,
    #[error("JWT subject is not a user id")]
    InvalidSubject,
    #[error("Could not sign JWT token: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                Self::UnsupportedAlgorithm
            }
            _ => Self::Malformed,
        }
    }
}

/// Issues and verifies HS512 identity tokens
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn expiration_ms(&self) -> i64 {
        self.config.expiration_ms
    }

    /// Create a token for `user_id`, valid for the configured lifetime
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Same as [`issue`](Self::issue) with an explicit issue time
    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let exp = issued_at + Duration::milliseconds(self.config.expiration_ms);
        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify `token` and return the user id it was issued for.
    ///
    /// The failure kind is logged; callers should treat every error as an
    /// authentication failure.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        self.decode_subject(token).map_err(|e| {
            warn!("Rejected JWT token: {}", e);
            e
        })
    }

    fn decode_subject(&self, token: &str) -> Result<i64, TokenError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSubject)
    }
}
