use crate::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/ask", post(crate::api::handlers::ask::ask))
        .route("/health", get(crate::api::handlers::health::health))
}
