use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::AccessTokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::REFRESH_TOKEN_COOKIE;
use crate::authentication::models::SignInCommand;
use crate::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

/// Every failure, including store faults, answers with the same 401.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<AccessTokenResponseData>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::info!(error = %rejection, "Sign-in body rejected");
        ApiError::incorrect_credentials()
    })?;

    // A name that fails validation cannot belong to any stored user.
    let username =
        Username::new(body.username).map_err(|_| ApiError::incorrect_credentials())?;

    let tokens = state
        .auth_service
        .sign_in(SignInCommand {
            username,
            password: body.password,
        })
        .await
        .map_err(|e| {
            tracing::info!(error = %e, "Sign-in rejected");
            ApiError::incorrect_credentials()
        })?;

    let cookie = Cookie::build((REFRESH_TOKEN_COOKIE, tokens.refresh_token))
        .http_only(true)
        .path("/");

    Ok((
        jar.add(cookie),
        ApiSuccess::new(
            StatusCode::OK,
            AccessTokenResponseData {
                access_token: tokens.access_token,
            },
        ),
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    username: String,
    password: String,
}
