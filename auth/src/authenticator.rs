use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetime of refresh tokens, independent of the access-token window.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Authentication coordinator combining password verification and token issuing.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Tokens issued on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `access_token_ttl` - Lifetime of access tokens
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], access_token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, access_token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against its stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `payload` - Identity claims embedded in both tokens
    ///
    /// # Returns
    /// TokenPair with access token (default ttl) and refresh token (7 days)
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate<P: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        payload: &P,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(TokenPair {
            access_token: self.issue_access_token(payload)?,
            refresh_token: self.issue_refresh_token(payload)?,
        })
    }

    /// Issue an access token with the configured default lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_access_token<P: Serialize>(&self, payload: &P) -> Result<String, JwtError> {
        self.jwt_handler.issue(payload, None)
    }

    /// Issue a refresh token valid for [`REFRESH_TOKEN_TTL_DAYS`].
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_refresh_token<P: Serialize>(&self, payload: &P) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(payload, Some(Duration::days(REFRESH_TOKEN_TTL_DAYS)))
    }

    /// Validate a token and return its payload.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, malformed, or wrongly signed
    pub fn validate_token<P: DeserializeOwned>(&self, token: &str) -> Result<P, JwtError> {
        self.jwt_handler.verify(token)
    }
}
