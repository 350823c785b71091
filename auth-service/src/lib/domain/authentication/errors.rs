use thiserror::Error;

/// Outcome kinds of the auth service operations.
///
/// Token verification faults never appear here: they are folded into
/// `AuthenticationFailed` so callers cannot tell expired, malformed and
/// forged tokens apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
