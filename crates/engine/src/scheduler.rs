//! Recurring schedule creation.
//!
//! Validates the request, computes the first next-execution instant with
//! the pure calculator, and persists an Active schedule. Firing the
//! schedule and advancing `next_execution` afterwards is the external
//! scheduler's job; it reuses the same calculator.

use chrono::{TimeZone, Utc};
use sqlx::PgPool;

use tradewind_core::error::CoreError;
use tradewind_core::report::new_schedule_id;
use tradewind_core::schedule::{next_execution, ScheduleRequest};
use tradewind_core::types::DbId;
use tradewind_db::models::schedule::{CreateSchedule, Schedule};
use tradewind_db::repositories::ScheduleRepo;

/// Errors surfaced by [`create_schedule`].
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// Pre-condition failure: nothing was persisted.
    #[error(transparent)]
    Invalid(CoreError),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Attempts at drawing a fresh schedule id before giving up.
const ID_ATTEMPTS: usize = 5;

/// Validate and persist a new recurring schedule.
pub async fn create_schedule(
    pool: &PgPool,
    user_id: DbId,
    request: &ScheduleRequest,
) -> Result<Schedule, ScheduleError> {
    let validated = request.validate().map_err(ScheduleError::Invalid)?;

    let now = Utc::now().naive_utc();
    let next = next_execution(now, validated.frequency, validated.execution_time);
    let next = Utc.from_utc_datetime(&next);

    let schedule_id = allocate_schedule_id(pool).await?;

    let schedule = ScheduleRepo::create(
        pool,
        &CreateSchedule {
            schedule_id,
            user_id,
            name: validated.name,
            frequency: validated.frequency.as_str().to_string(),
            execution_time: validated.execution_time,
            recipients: validated.email,
            next_execution: next,
        },
    )
    .await?;

    tracing::info!(
        schedule_id = %schedule.schedule_id,
        frequency = %schedule.frequency,
        next_execution = %schedule.next_execution,
        user_id,
        "Report schedule created",
    );

    Ok(schedule)
}

/// Draw a schedule id that is unused within the schedules namespace.
async fn allocate_schedule_id(pool: &PgPool) -> Result<String, ScheduleError> {
    for _ in 0..ID_ATTEMPTS {
        let candidate = new_schedule_id();
        if !ScheduleRepo::exists(pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(ScheduleError::Internal(
        "could not allocate a unique schedule id".to_string(),
    ))
}
