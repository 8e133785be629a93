//! Route definitions for the `/reports` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST   /generate         -> generate_report
/// GET    /recent           -> recent_reports
/// GET    /download/{id}    -> download_report
/// DELETE /{id}             -> delete_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(reports::generate_report))
        .route("/recent", get(reports::recent_reports))
        .route("/download/{id}", get(reports::download_report))
        .route("/{id}", delete(reports::delete_report))
}
