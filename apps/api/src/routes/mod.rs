pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::draft::handlers;

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/draft/normalize", post(handlers::handle_normalize))
}
