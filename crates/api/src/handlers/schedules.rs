//! Handlers for recurring report schedules.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use tradewind_core::schedule::ScheduleRequest;
use tradewind_core::types::Timestamp;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response payload for a successfully created schedule.
#[derive(Debug, Serialize)]
pub struct ScheduleCreatedResponse {
    pub schedule_id: String,
    pub next_execution: Timestamp,
}

/// Validate and persist a new recurring schedule.
pub async fn create_schedule(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    let schedule =
        tradewind_engine::create_schedule(&state.pool, user.user_id, &input).await?;

    let response = ScheduleCreatedResponse {
        schedule_id: schedule.schedule_id,
        next_execution: schedule.next_execution,
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}
