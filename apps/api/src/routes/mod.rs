pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::ingest::handlers as ingest;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/role", put(session::handle_switch_role))
        // Ingestion
        .route("/api/v1/sessions/:id/resumes", post(ingest::handle_upload))
        .route(
            "/api/v1/sessions/:id/candidates",
            post(ingest::handle_ingest_parsed),
        )
        // Dashboard
        .route(
            "/api/v1/sessions/:id/view",
            axum::routing::patch(session::handle_update_view),
        )
        .route(
            "/api/v1/sessions/:id/view/sort",
            post(session::handle_press_sort),
        )
        .route(
            "/api/v1/sessions/:id/dashboard",
            get(session::handle_dashboard),
        )
        .route(
            "/api/v1/sessions/:id/selection/:candidate_id",
            post(session::handle_toggle_selection),
        )
        .route(
            "/api/v1/sessions/:id/comparison",
            get(session::handle_comparison),
        )
        .route("/api/v1/sessions/:id/export", post(export::handle_export))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
