//! Repository for the `reports` table.
//!
//! Status transitions are enforced here: a record is inserted in
//! Generating and terminalized by a single guarded UPDATE, so a report
//! can never be terminalized twice or re-enter Generating (see
//! [`ReportStatus::can_transition_to`]).

use sqlx::PgPool;
use tradewind_core::types::DbId;

use crate::models::report::{CreateReport, Report, ReportListItem};
use crate::models::status::ReportStatus;

/// Column list for `reports` queries.
const COLUMNS: &str = "\
    report_id, user_id, category, report_type, format, \
    start_date, end_date, status_id, file_name, file_path, \
    parameters, error_message, created_at, updated_at";

/// Maximum page size for report listing.
pub const MAX_LIMIT: i64 = 50;

/// Default page size for report listing.
pub const DEFAULT_LIMIT: i64 = 10;

/// Provides CRUD operations for report records.
pub struct ReportRepo;

impl ReportRepo {
    /// Check whether a report id is already taken. Report ids only need
    /// to be unique within the reports table.
    pub async fn exists(pool: &PgPool, report_id: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM reports WHERE report_id = $1)")
                .bind(report_id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Atomically insert a new record in Generating status.
    ///
    /// This runs before any content work so a crash mid-generation
    /// leaves a durably observable non-terminal record.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports \
                 (report_id, user_id, category, report_type, format, \
                  start_date, end_date, status_id, file_name, parameters) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(&input.report_id)
            .bind(input.user_id)
            .bind(&input.category)
            .bind(&input.report_type)
            .bind(&input.format)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(ReportStatus::Generating.id())
            .bind(&input.file_name)
            .bind(&input.parameters)
            .fetch_one(pool)
            .await
    }

    /// Transition a Generating record to Completed with its file path.
    ///
    /// Returns `false` when the record was not in Generating (already
    /// terminal or missing); the guard makes the transition idempotent
    /// and single-shot.
    pub async fn mark_completed(
        pool: &PgPool,
        report_id: &str,
        file_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reports \
             SET status_id = $2, file_path = $3, updated_at = NOW() \
             WHERE report_id = $1 AND status_id = $4",
        )
        .bind(report_id)
        .bind(ReportStatus::Completed.id())
        .bind(file_path)
        .bind(ReportStatus::Generating.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition a Generating record to Failed with an error message.
    ///
    /// Same single-shot guard as [`Self::mark_completed`].
    pub async fn mark_failed(
        pool: &PgPool,
        report_id: &str,
        error_message: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reports \
             SET status_id = $2, error_message = $3, updated_at = NOW() \
             WHERE report_id = $1 AND status_id = $4",
        )
        .bind(report_id)
        .bind(ReportStatus::Failed.id())
        .bind(error_message)
        .bind(ReportStatus::Generating.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a report owned by the given user.
    ///
    /// The ownership predicate is part of the query so another user's
    /// report is indistinguishable from a missing one.
    pub async fn find_for_user(
        pool: &PgPool,
        report_id: &str,
        user_id: DbId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE report_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Report>(&query)
            .bind(report_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List the user's most recent reports, newest-first.
    ///
    /// `limit` is clamped into `[1, MAX_LIMIT]`.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<ReportListItem>, sqlx::Error> {
        let limit = clamp_limit(limit);
        sqlx::query_as::<_, ReportListItem>(
            "SELECT r.report_id AS id, r.file_name AS name, r.category, r.format, \
                    s.name AS status, r.created_at AS generated_at, r.updated_at \
             FROM reports r \
             JOIN report_statuses s ON s.id = r.status_id \
             WHERE r.user_id = $1 \
             ORDER BY r.created_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Delete a report record owned by the given user.
    ///
    /// Returns `true` when a row was removed. File removal is the
    /// caller's concern and never blocks record deletion.
    pub async fn delete(
        pool: &PgPool,
        report_id: &str,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE report_id = $1 AND user_id = $2")
            .bind(report_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Silently clamp a requested page size into `[1, MAX_LIMIT]`, defaulting
/// to [`DEFAULT_LIMIT`] when absent.
fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}
