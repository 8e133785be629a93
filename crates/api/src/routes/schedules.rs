//! Route definitions for the `/schedules` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::schedules;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
///
/// ```text
/// POST   /    -> create_schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(schedules::create_schedule))
}
