//! Repository for the `report_schedules` table.

use sqlx::PgPool;

use crate::models::schedule::{CreateSchedule, Schedule};
use crate::models::status::ScheduleStatus;

/// Column list for `report_schedules` queries.
const COLUMNS: &str = "\
    schedule_id, user_id, name, frequency, execution_time, recipients, \
    status_id, next_execution, created_at, updated_at";

/// Provides CRUD operations for report schedules.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Check whether a schedule id is already taken (own namespace only).
    pub async fn exists(pool: &PgPool, schedule_id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM report_schedules WHERE schedule_id = $1)",
        )
        .bind(schedule_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Insert a new schedule in Active status.
    pub async fn create(pool: &PgPool, input: &CreateSchedule) -> Result<Schedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_schedules \
                 (schedule_id, user_id, name, frequency, execution_time, \
                  recipients, status_id, next_execution) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(&input.schedule_id)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.frequency)
            .bind(input.execution_time)
            .bind(&input.recipients)
            .bind(ScheduleStatus::Active.id())
            .bind(input.next_execution)
            .fetch_one(pool)
            .await
    }
}
