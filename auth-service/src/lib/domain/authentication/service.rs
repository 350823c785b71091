use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignInTokens;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::authentication::models::TokenPayload;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// Domain service implementing sign-up, sign-in and refresh.
pub struct AuthService<US>
where
    US: UserServicePort,
{
    user_service: Arc<US>,
    authenticator: Arc<Authenticator>,
}

impl<US> AuthService<US>
where
    US: UserServicePort,
{
    /// Create a new auth service.
    ///
    /// # Arguments
    /// * `user_service` - Users service backed by the user store
    /// * `authenticator` - Credential hasher and token issuer
    pub fn new(user_service: Arc<US>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            user_service,
            authenticator,
        }
    }
}

#[async_trait]
impl<US> AuthServicePort for AuthService<US>
where
    US: UserServicePort,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError> {
        match self
            .user_service
            .get_user_by_username(&command.username)
            .await
        {
            Ok(existing) => {
                return Err(AuthError::UserAlreadyExists(
                    existing.username.as_str().to_string(),
                ))
            }
            Err(UserError::NotFoundByUsername(_)) => {}
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed during sign-up");
                return Err(AuthError::StoreUnavailable(e.to_string()));
            }
        }

        // The existence check above races with concurrent sign-ups; the store's
        // unique key is what actually rejects the second insert.
        self.user_service
            .create_user(CreateUserCommand::new(command.username, command.password))
            .await
            .map_err(|e| match e {
                UserError::UsernameAlreadyExists(username) => {
                    AuthError::UserAlreadyExists(username)
                }
                UserError::DatabaseError(msg) => {
                    tracing::error!(error = %msg, "User insert failed during sign-up");
                    AuthError::StoreUnavailable(msg)
                }
                other => {
                    tracing::error!(error = %other, "Sign-up failed");
                    AuthError::Internal(other.to_string())
                }
            })
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<SignInTokens, AuthError> {
        let user = self
            .user_service
            .get_user_by_username(&command.username)
            .await
            .map_err(|e| match e {
                UserError::NotFoundByUsername(_) => {
                    tracing::warn!(username = %command.username, "Sign-in for unknown user");
                    AuthError::AuthenticationFailed
                }
                other => {
                    tracing::error!(error = %other, "User lookup failed during sign-in");
                    AuthError::StoreUnavailable(other.to_string())
                }
            })?;

        let payload = TokenPayload::from(&user);
        let authenticator = Arc::clone(&self.authenticator);
        let password_hash = user.password_hash.clone();

        // Argon2 verification is CPU-bound.
        tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&command.password, &password_hash, &payload)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Credential check task failed");
            AuthError::Internal(e.to_string())
        })?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::warn!(user_id = %user.id, "Sign-in with wrong password");
                AuthError::AuthenticationFailed
            }
            AuthenticationError::PasswordError(err) => {
                tracing::error!(user_id = %user.id, error = %err, "Stored hash unusable");
                AuthError::Internal(err.to_string())
            }
            AuthenticationError::JwtError(err) => {
                tracing::error!(error = %err, "Token issuing failed");
                AuthError::Internal(err.to_string())
            }
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::AuthenticationFailed);
        }

        let payload: TokenPayload =
            self.authenticator
                .validate_token(refresh_token)
                .map_err(|e| {
                    tracing::warn!(error = %e, "Refresh token rejected");
                    AuthError::AuthenticationFailed
                })?;

        self.authenticator
            .issue_access_token(&payload)
            .map(AccessToken)
            .map_err(|e| {
                tracing::error!(error = %e, "Token issuing failed");
                AuthError::Internal(e.to_string())
            })
    }
}
