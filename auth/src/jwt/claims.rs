use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Signed token body: a service-defined payload plus the time-bound claims.
///
/// The payload is flattened, so a payload `{ sub, username }` encodes as
/// `{ "sub": .., "username": .., "iat": .., "exp": .. }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims<P> {
    #[serde(flatten)]
    pub payload: P,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl<P> Claims<P> {
    /// Wrap a payload with `iat = issued_at` and `exp = issued_at + ttl`.
    pub fn new(payload: P, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            payload,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}
