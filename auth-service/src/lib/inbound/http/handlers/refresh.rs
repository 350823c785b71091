use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::AccessTokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::REFRESH_TOKEN_COOKIE;
use crate::authentication::models::AccessToken;
use crate::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange the `refresh_token` cookie for a new access token. No body.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<ApiSuccess<AccessTokenResponseData>, ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let AccessToken(access_token) = state
        .auth_service
        .refresh(&refresh_token)
        .await
        .map_err(|_| ApiError::Unauthorized("Unauthorized".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccessTokenResponseData { access_token },
    ))
}
