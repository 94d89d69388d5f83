use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    db::UserStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
};

pub mod user;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/user", user_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Preference routes under /api/user
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/watchlist/:email", get(user::get_watchlist))
        .route("/likes/:email", get(user::get_likes))
        .route("/add-watchlist", post(user::add_to_watchlist))
        .route("/remove-watchlist", post(user::remove_from_watchlist))
        .route("/toggle-like", post(user::toggle_like))
}

/// Liveness text
async fn root() -> &'static str {
    "MovieFlix API is running..."
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
