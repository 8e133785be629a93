//! Report schedule entity models.

use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;
use tradewind_core::types::{DbId, Timestamp};

use super::status::StatusId;

/// A row from the `report_schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub schedule_id: String,
    pub user_id: DbId,
    pub name: String,
    pub frequency: String,
    pub execution_time: NaiveTime,
    pub recipients: String,
    pub status_id: StatusId,
    /// Strictly in the future at creation time; recomputed by the
    /// external scheduler after each firing.
    pub next_execution: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new active schedule.
#[derive(Debug, Clone)]
pub struct CreateSchedule {
    pub schedule_id: String,
    pub user_id: DbId,
    pub name: String,
    pub frequency: String,
    pub execution_time: NaiveTime,
    pub recipients: String,
    pub next_execution: Timestamp,
}
