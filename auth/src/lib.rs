//! Authentication utilities library
//!
//! Provides the credential and token primitives the auth service is built on:
//! - Password hashing (Argon2id, per-call random salt, constant-time verify)
//! - Signed, time-bound tokens (HS256 JWT) over a caller-defined payload
//! - Authentication coordination (verify password, issue access + refresh tokens)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//! let mut payload = std::collections::HashMap::new();
//! payload.insert("sub", "user123");
//! let token = handler.issue(&payload, None).unwrap();
//! let decoded: std::collections::HashMap<String, String> = handler.verify(&token).unwrap();
//! assert_eq!(decoded["sub"], "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue both tokens
//! let payload = std::collections::HashMap::from([("sub", "user123")]);
//! let tokens = auth.authenticate("password123", &hash, &payload).unwrap();
//! assert!(!tokens.refresh_token.is_empty());
//!
//! // Refresh: validate and reissue the access token
//! let payload: std::collections::HashMap<String, String> =
//!     auth.validate_token(&tokens.refresh_token).unwrap();
//! let access_token = auth.issue_access_token(&payload).unwrap();
//! assert!(!access_token.is_empty());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::REFRESH_TOKEN_TTL_DAYS;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
