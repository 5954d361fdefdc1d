//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domains::user::AuthService;
use crate::server::routes::{
    get_profile_handler, health_handler, login_handler, register_handler, update_profile_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
}

/// Build the Axum application router
///
/// Requests that exceed `request_timeout` are aborted with 408 before they reach the
/// service.
pub fn build_app(auth_service: Arc<AuthService>, request_timeout: Duration) -> Router {
    let state = AppState { auth_service };

    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route(
            "/profile",
            get(get_profile_handler).patch(update_profile_handler),
        )
        .route("/health", get(health_handler))
        .layer(Extension(state))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
