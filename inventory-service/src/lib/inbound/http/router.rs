use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_category::create_category;
use super::handlers::create_product::create_product;
use super::handlers::delete_category::delete_category;
use super::handlers::delete_product::delete_product;
use super::handlers::get_category::get_category;
use super::handlers::get_product::get_product;
use super::handlers::list_categories::list_categories;
use super::handlers::list_products::list_products;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::handlers::update_category::update_category;
use super::handlers::update_product::update_product;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::category::ports::CategoryServicePort;
use crate::domain::product::ports::ProductServicePort;

/// Shared handler state.
///
/// Services are held behind their ports so tests can wire in-memory
/// implementations through the same router.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub category_service: Arc<dyn CategoryServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:category_id", get(get_category))
        .route("/api/products", get(list_products))
        .route("/api/products/:product_id", get(get_product));

    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/categories", post(create_category))
        .route("/api/categories/:category_id", patch(update_category))
        .route("/api/categories/:category_id", delete(delete_category))
        .route("/api/products", post(create_product))
        .route("/api/products/:product_id", patch(update_product))
        .route("/api/products/:product_id", delete(delete_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
