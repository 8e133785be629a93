//! Report entity models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tradewind_core::types::{DbId, Timestamp};

use super::status::StatusId;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub report_id: String,
    pub user_id: DbId,
    pub category: String,
    pub report_type: String,
    pub format: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status_id: StatusId,
    pub file_name: String,
    /// Set only when the report reaches Completed.
    pub file_path: Option<String>,
    /// Serialized original request parameters.
    pub parameters: serde_json::Value,
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new `generating` report record.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub report_id: String,
    pub user_id: DbId,
    pub category: String,
    pub report_type: String,
    pub format: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub file_name: String,
    pub parameters: serde_json::Value,
}

/// Listing row for `GET /reports/recent`, with the status name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportListItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub format: String,
    pub status: String,
    pub generated_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for `GET /reports/recent`.
#[derive(Debug, Deserialize)]
pub struct RecentReportsQuery {
    /// Maximum number of results. Defaults to 10, clamped into [1, 50].
    pub limit: Option<i64>,
}
