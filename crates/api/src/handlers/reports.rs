//! Handlers for report generation, listing, download, and deletion.

use std::path::Path as FsPath;

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use tradewind_core::error::CoreError;
use tradewind_core::report::{ReportFormat, ReportRequest};
use tradewind_db::models::report::{RecentReportsQuery, Report};
use tradewind_db::models::status::ReportStatus;
use tradewind_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find a report owned by the requesting user, or 404.
///
/// Another user's report is indistinguishable from a missing one.
async fn ensure_owned_report(
    pool: &sqlx::PgPool,
    report_id: &str,
    user_id: i64,
) -> AppResult<Report> {
    ReportRepo::find_for_user(pool, report_id, user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Report",
                id: report_id.to_string(),
            })
        })
}

// ---------------------------------------------------------------------------
// POST /reports/generate
// ---------------------------------------------------------------------------

/// Response payload for a successful generation.
#[derive(Debug, Serialize)]
pub struct ReportGeneratedResponse {
    pub report_id: String,
    pub file_name: String,
    pub download_url: String,
}

/// Run a report generation request synchronously and return the terminal
/// record's coordinates.
pub async fn generate_report(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ReportRequest>,
) -> AppResult<impl IntoResponse> {
    let report =
        tradewind_engine::generate(&state.pool, &state.store, user.user_id, &input).await?;

    let response = ReportGeneratedResponse {
        download_url: format!("/api/v1/reports/download/{}", report.report_id),
        report_id: report.report_id,
        file_name: report.file_name,
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

// ---------------------------------------------------------------------------
// GET /reports/recent
// ---------------------------------------------------------------------------

/// List the caller's reports, newest-first. The limit is silently
/// clamped into [1, 50] by the repository.
pub async fn recent_reports(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RecentReportsQuery>,
) -> AppResult<impl IntoResponse> {
    let reports = ReportRepo::list_recent(&state.pool, user.user_id, params.limit).await?;
    Ok(Json(DataResponse { data: reports }))
}

// ---------------------------------------------------------------------------
// GET /reports/download/{id}
// ---------------------------------------------------------------------------

/// Stream a completed report's bytes as an attachment.
pub async fn download_report(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = ensure_owned_report(&state.pool, &id, user.user_id).await?;

    if report.status_id != ReportStatus::Completed.id() {
        return Err(AppError::BadRequest(
            "Report is not completed yet".to_string(),
        ));
    }

    let file_path = report.file_path.as_deref().ok_or_else(|| {
        AppError::InternalError(format!("completed report {id} has no file path"))
    })?;

    let bytes = state
        .store
        .read(FsPath::new(file_path))
        .await
        .map_err(|e| {
            tracing::warn!(report_id = %id, error = %e, "Report file missing on download");
            AppError::Core(CoreError::NotFound {
                entity: "ReportFile",
                id: id.clone(),
            })
        })?;

    let content_type = ReportFormat::parse(&report.format)
        .map(ReportFormat::content_type)
        .unwrap_or("application/octet-stream");
    let disposition = format!("attachment; filename=\"{}\"", report.file_name);

    Ok((
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

// ---------------------------------------------------------------------------
// DELETE /reports/{id}
// ---------------------------------------------------------------------------

/// Response payload for a successful deletion.
#[derive(Debug, Serialize)]
pub struct ReportDeletedResponse {
    pub success: bool,
}

/// Delete a report record and its backing file.
///
/// File removal is best-effort: a failure is logged but never blocks
/// record deletion, which alone decides success.
pub async fn delete_report(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let report = ensure_owned_report(&state.pool, &id, user.user_id).await?;

    if let Some(file_path) = report.file_path.as_deref() {
        if let Err(e) = state.store.remove(FsPath::new(file_path)).await {
            tracing::warn!(report_id = %id, error = %e, "Failed to remove report file");
        }
    }

    let deleted = ReportRepo::delete(&state.pool, &id, user.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }));
    }

    tracing::info!(report_id = %id, user_id = user.user_id, "Report deleted");

    Ok(Json(DataResponse {
        data: ReportDeletedResponse { success: true },
    }))
}
