//! Session token generation and validation.
//!
//! Tokens are JWTs carrying a [`Claims`] payload. They are signed with an EC
//! key pair (ES384) when PEM files are configured, otherwise with an HMAC
//! secret (HS256).

use std::fmt;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use dreamhome_core::types::DbId;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's database id.
    pub user_id: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Default token lifetime in days.
pub const DEFAULT_EXPIRY_DAYS: i64 = 30;

/// Signing and verification keys plus token lifetime.
#[derive(Clone)]
pub struct JwtConfig {
    pub algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    /// Token lifetime in days (default: 30).
    pub expiry_days: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("expiry_days", &self.expiry_days)
            .finish_non_exhaustive()
    }
}

impl JwtConfig {
    /// HS256 keys derived from a shared secret.
    pub fn from_secret(secret: &str, expiry_days: i64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_days,
        }
    }

    /// ES384 keys from a PKCS#8 private key and its SPKI public key, both PEM.
    pub fn from_ec_pem(
        private_pem: &[u8],
        public_pem: &[u8],
        expiry_days: i64,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        Ok(Self {
            algorithm: Algorithm::ES384,
            encoding: EncodingKey::from_ec_pem(private_pem)?,
            decoding: DecodingKey::from_ec_pem(public_pem)?,
            expiry_days,
        })
    }

    /// Load token configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_EC_PRIVATE_KEY_PATH` | no       | --      |
    /// | `JWT_EC_PUBLIC_KEY_PATH`  | no       | --      |
    /// | `JWT_SECRET`              | when no key pair is configured | -- |
    /// | `JWT_EXPIRY_DAYS`         | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if neither a key pair nor a non-empty secret is configured, or
    /// if the key files cannot be read or parsed.
    pub fn from_env() -> Self {
        let expiry_days: i64 = std::env::var("JWT_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_EXPIRY_DAYS must be a valid i64");

        let private_path = std::env::var("JWT_EC_PRIVATE_KEY_PATH").ok();
        let public_path = std::env::var("JWT_EC_PUBLIC_KEY_PATH").ok();

        if let (Some(private_path), Some(public_path)) = (private_path, public_path) {
            let private_pem = std::fs::read(&private_path)
                .unwrap_or_else(|e| panic!("Cannot read JWT private key '{private_path}': {e}"));
            let public_pem = std::fs::read(&public_path)
                .unwrap_or_else(|e| panic!("Cannot read JWT public key '{public_path}': {e}"));
            return Self::from_ec_pem(&private_pem, &public_pem, expiry_days)
                .expect("JWT key pair must be PEM-encoded P-384 keys");
        }

        let secret = std::env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set when no EC key pair is configured");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self::from_secret(&secret, expiry_days)
    }

    /// Token lifetime in seconds, used for the cookie `Max-Age`.
    pub fn max_age_secs(&self) -> i64 {
        self.expiry_days * 24 * 60 * 60
    }
}

/// Generate a signed session token for the given user.
pub fn generate_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        user_id,
        iat: now,
        exp: now + config.max_age_secs(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(&Header::new(config.algorithm), &claims, &config.encoding)
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Checks the signature, the algorithm and expiry.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(token, &config.decoding, &Validation::new(config.algorithm))?;
    Ok(token_data.claims)
}
