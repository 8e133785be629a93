//! Report lifecycle orchestration.
//!
//! Ordering is load-bearing: the `generating` record is persisted before
//! any content work, the file write happens strictly before the
//! Completed transition, and every post-insert failure is converted into
//! a single guarded Failed transition. Callers therefore never observe a
//! record in `generating` after [`generate`] returns.

use std::io;
use std::path::PathBuf;

use sqlx::PgPool;

use tradewind_core::encode;
use tradewind_core::error::CoreError;
use tradewind_core::report::{
    derive_file_name, new_report_id, resolve_kind, ReportFormat, ReportRequest, ValidatedRequest,
};
use tradewind_core::types::DbId;
use tradewind_db::models::report::{CreateReport, Report};
use tradewind_db::repositories::ReportRepo;

use crate::builders;
use crate::storage::ReportStore;

/// Attempts at drawing a fresh report id before giving up. Collisions on
/// UUID-backed ids are not expected in practice.
const ID_ATTEMPTS: usize = 5;

/// Errors surfaced by [`generate`].
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Pre-condition failure: nothing was persisted.
    #[error(transparent)]
    Invalid(CoreError),

    /// Database failure outside the builder/encoder pipeline.
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    /// Post-condition failure: a Failed record was persisted. The raw
    /// cause is logged server-side, never shown to the caller.
    #[error("Report generation failed")]
    Generation { report_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Everything that can go wrong after the `generating` insert.
#[derive(Debug, thiserror::Error)]
enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run a generation request end to end, returning the terminal record.
pub async fn generate(
    pool: &PgPool,
    store: &ReportStore,
    user_id: DbId,
    request: &ReportRequest,
) -> Result<Report, GenerateError> {
    // Validation short-circuits before any write.
    let validated = request.validate().map_err(GenerateError::Invalid)?;

    let report_id = allocate_report_id(pool).await?;
    let file_name = derive_file_name(
        &validated.report_type,
        &validated.format,
        validated.start,
        validated.end,
        chrono::Utc::now(),
    );
    let parameters = serde_json::to_value(request)
        .map_err(|e| GenerateError::Internal(format!("request serialization failed: {e}")))?;

    ReportRepo::create(
        pool,
        &CreateReport {
            report_id: report_id.clone(),
            user_id,
            category: validated.category.clone(),
            report_type: validated.report_type.clone(),
            format: validated.format.clone(),
            start_date: validated.start,
            end_date: validated.end,
            file_name: file_name.clone(),
            parameters,
        },
    )
    .await?;

    tracing::info!(
        report_id = %report_id,
        category = %validated.category,
        report_type = %validated.report_type,
        user_id,
        "Report generation started",
    );

    match run_pipeline(pool, store, &validated, &file_name).await {
        Ok(file_path) => {
            let path = file_path.to_string_lossy().into_owned();
            let transitioned = ReportRepo::mark_completed(pool, &report_id, &path).await?;
            if !transitioned {
                // The guard only misses when the record left Generating
                // out from under us; surface it rather than guess.
                return Err(GenerateError::Internal(format!(
                    "report {report_id} was not in generating state at completion"
                )));
            }

            tracing::info!(report_id = %report_id, file = %path, "Report completed");

            ReportRepo::find_for_user(pool, &report_id, user_id)
                .await?
                .ok_or_else(|| {
                    GenerateError::Internal(format!("report {report_id} missing after completion"))
                })
        }
        Err(failure) => {
            tracing::error!(
                report_id = %report_id,
                error = %failure,
                "Report generation failed",
            );

            // The pipeline writes the file last, but clean up anyway in
            // case a partial file was left behind.
            let _ = store.remove(&store.path_for(&file_name)).await;

            if let Err(db_err) = ReportRepo::mark_failed(pool, &report_id, &failure.to_string()).await
            {
                tracing::error!(
                    report_id = %report_id,
                    error = %db_err,
                    "Failed to terminalize report record",
                );
            }

            Err(GenerateError::Generation { report_id })
        }
    }
}

/// Build, encode, and write the report file. Runs strictly after the
/// `generating` insert; any error here terminalizes the record as Failed.
async fn run_pipeline(
    pool: &PgPool,
    store: &ReportStore,
    validated: &ValidatedRequest,
    file_name: &str,
) -> Result<PathBuf, PipelineError> {
    let kind = resolve_kind(&validated.category, &validated.report_type)?;
    let format = ReportFormat::parse(&validated.format)?;

    let payload = builders::build(pool, &kind, validated).await?;
    let bytes = encode::encode(&payload, format)?;

    let path = store.write(file_name, &bytes).await?;
    Ok(path)
}

/// Draw a report id that is unused within the reports namespace.
async fn allocate_report_id(pool: &PgPool) -> Result<String, GenerateError> {
    for _ in 0..ID_ATTEMPTS {
        let candidate = new_report_id();
        if !ReportRepo::exists(pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(GenerateError::Internal(
        "could not allocate a unique report id".to_string(),
    ))
}
