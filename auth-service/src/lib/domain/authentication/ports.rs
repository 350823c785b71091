use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignInTokens;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::user::models::User;

/// Port for the sign-up / sign-in / refresh protocol.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username is already taken
    /// * `StoreUnavailable` - User store fault
    /// * `Internal` - Password hashing failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Unknown username or wrong password
    /// * `StoreUnavailable` - User store fault
    /// * `Internal` - Stored hash unusable or token signing failed
    async fn sign_in(&self, command: SignInCommand) -> Result<SignInTokens, AuthError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Token empty, expired, malformed or forged
    /// * `Internal` - Token signing failed
    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError>;
}
