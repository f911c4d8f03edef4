pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::assistant::handlers::handle_chat;
use crate::hunt::handlers::handle_trigger_hunt;
use crate::resume::handlers::handle_generate_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let reports = ServeDir::new(state.reports_dir());

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/trigger-hunt", post(handle_trigger_hunt))
        .route("/api/generate-resume", post(handle_generate_resume))
        .route("/api/chat", post(handle_chat))
        .nest_service("/reports", reports)
        .with_state(state)
}
