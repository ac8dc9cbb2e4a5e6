use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::messages::SessionData;
use crate::inbound::http::router::AppState;

/// Rotate a refresh token for a fresh pair.
///
/// The presented token is single use: a second call with the same token
/// lands on the not-found path because rotation revoked it.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|ref session| {
            ApiSuccess::new(
                StatusCode::OK,
                "Token refreshed successfully",
                session.into(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    refresh_token: String,
}
