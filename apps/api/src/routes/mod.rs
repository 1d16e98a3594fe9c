pub mod form;
pub mod health;
pub mod index;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::render;
use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index::index_handler))
        .route("/hello", get(health::hello_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/analyze_resume", post(handlers::handle_analyze_resume))
        .route("/enhance", post(handlers::handle_enhance))
        .route("/generate", post(render::handlers::handle_generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
