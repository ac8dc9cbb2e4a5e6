use auth::TokenPurpose;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::domain::auth::models::UserId;
use crate::inbound::http::handlers::ApiErrorBody;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user info in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorBody::new(
            StatusCode::UNAUTHORIZED,
            message.to_string(),
        )),
    )
        .into_response()
}

/// Middleware that validates access tokens and adds user info to request
/// extensions. Refresh tokens are rejected here even when their signature
/// and expiry check out.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.token_issuer.decode(token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    if claims.purpose != TokenPurpose::Access {
        tracing::warn!("Token with non-access purpose presented to protected route");
        return Err(unauthorized("Invalid or expired token"));
    }

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        unauthorized("Invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username.clone(),
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    if !auth_str.starts_with("Bearer ") {
        return Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        ));
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
