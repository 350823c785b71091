use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn profile(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<ProfileResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ProfileResponseData {
            id: user.user_id.0,
            username: user.username,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: i64,
    pub username: String,
}
