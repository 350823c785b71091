use thiserror::Error;

/// Failures of the credential hasher.
///
/// A password mismatch is not an error; see [`super::PasswordHasher::verify`].
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unusable: {0}")]
    VerificationFailed(String),
}
