pub mod health;
pub mod reports;
pub mod schedules;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /reports/generate             generate a report (POST)
/// /reports/recent               list own reports, newest-first (GET)
/// /reports/download/{id}        download a completed report (GET)
/// /reports/{id}                 delete a report and its file (DELETE)
///
/// /schedules                    create a recurring schedule (POST)
/// ```
///
/// All routes require a Bearer JWT.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/schedules", schedules::router())
}
