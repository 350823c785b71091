use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs and verifies time-bound tokens (HS256).
///
/// Generic over the payload type so services define their own identity claims;
/// `iat` and `exp` are always added by the handler.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret, at least 32 bytes
    /// * `default_ttl` - Lifetime used by [`JwtHandler::issue`] when none is given
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    pub fn new(secret: &[u8], default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_ttl,
        }
    }

    /// Issue a signed token for `payload`.
    ///
    /// # Arguments
    /// * `payload` - Identity claims to embed
    /// * `ttl` - Token lifetime; `None` uses the handler's default
    ///
    /// # Returns
    /// Compact JWT string carrying `payload`, `iat` and `exp`
    ///
    /// # Errors
    /// * `EncodingFailed` - Payload could not be serialized or signed
    pub fn issue<P: Serialize>(
        &self,
        payload: &P,
        ttl: Option<Duration>,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(payload, Utc::now(), ttl.unwrap_or(self.default_ttl));

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and recover its payload.
    ///
    /// The `exp` claim is mandatory and checked without leeway.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// The payload the token was issued with
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Bad signature, malformed token, or payload mismatch
    pub fn verify<P: DeserializeOwned>(&self, token: &str) -> Result<P, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims<P>>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims.into_payload())
    }
}
