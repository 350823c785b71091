use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Identity claims carried by both access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub sub: UserId,
    pub username: String,
}

impl From<&User> for TokenPayload {
    fn from(user: &User) -> Self {
        Self {
            sub: user.id,
            username: user.username.as_str().to_string(),
        }
    }
}

/// Validated sign-up input.
#[derive(Debug)]
pub struct SignUpCommand {
    pub username: Username,
    pub password: Password,
}

/// Sign-in input. The password is checked against the stored hash only, so
/// no policy is applied to it here.
pub struct SignInCommand {
    pub username: Username,
    pub password: String,
}

impl std::fmt::Debug for SignInCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInCommand")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Tokens returned by a successful sign-in.
///
/// The access token goes to the response body, the refresh token to the
/// `refresh_token` cookie.
pub type SignInTokens = auth::TokenPair;

/// Access token minted by a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
