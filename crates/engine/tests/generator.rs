//! Integration tests for the generation pipeline against a real Postgres
//! schema: terminal outcomes, file side effects, and record counts.

use chrono::NaiveDate;
use sqlx::PgPool;

use tradewind_core::report::ReportRequest;
use tradewind_db::models::status::ReportStatus;
use tradewind_db::repositories::ReportRepo;
use tradewind_engine::{generate, GenerateError, ReportStore};

fn request(category: &str, report_type: &str, format: &str) -> ReportRequest {
    ReportRequest {
        category: category.to_string(),
        report_type: report_type.to_string(),
        report_format: format.to_string(),
        start_date: "2024-03-01".to_string(),
        end_date: "2024-03-10".to_string(),
        commodity: None,
        trader: None,
    }
}

async fn seed_trade(pool: &PgPool, date: &str, commodity: &str, quantity: f64, price: f64) {
    sqlx::query(
        "INSERT INTO trades (trade_date, commodity, trader, counterparty, quantity, price) \
         VALUES ($1, $2, 'jsmith', 'Acme Energy', $3, $4)",
    )
    .bind(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap())
    .bind(commodity)
    .bind(quantity)
    .bind(price)
    .execute(pool)
    .await
    .unwrap();
}

async fn report_count(pool: &PgPool, status: Option<ReportStatus>) -> i64 {
    match status {
        Some(status) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE status_id = $1")
                .bind(status.id())
                .fetch_one(pool)
                .await
                .unwrap()
        }
        None => sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(pool)
            .await
            .unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Test: a valid request yields exactly one Completed record and one file
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn valid_request_terminalizes_as_completed_with_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path());

    seed_trade(&pool, "2024-03-05", "WTI", 100.0, 80.0).await;
    seed_trade(&pool, "2024-03-06", "Brent", 50.0, 82.0).await;
    // Outside the requested range; must not appear.
    seed_trade(&pool, "2024-02-01", "Gas", 10.0, 3.0).await;

    let report = generate(&pool, &store, 1, &request("trading", "trade_summary", "csv"))
        .await
        .unwrap();

    assert_eq!(report.status_id, ReportStatus::Completed.id());
    assert_eq!(report.user_id, 1);

    let text = std::fs::read_to_string(report.file_path.as_deref().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[4],
        "trade_id,trade_date,commodity,trader,counterparty,quantity,price,value"
    );
    assert!(text.contains("WTI"));
    assert!(text.contains("Brent"));
    assert!(!text.contains("Gas"));

    // Exactly one record, and nothing left in Generating.
    assert_eq!(report_count(&pool, None).await, 1);
    assert_eq!(report_count(&pool, Some(ReportStatus::Generating)).await, 0);
}

// ---------------------------------------------------------------------------
// Test: zero matching trades is a legitimate Completed report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn zero_matching_trades_completes_with_zeroed_aggregates(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path());

    let report = generate(&pool, &store, 1, &request("trading", "trade_summary", "pdf"))
        .await
        .unwrap();

    assert_eq!(report.status_id, ReportStatus::Completed.id());

    let text = std::fs::read_to_string(report.file_path.as_deref().unwrap()).unwrap();
    assert!(text.contains("total_trades: 0"));
    assert!(text.contains("total_volume: 0"));
    assert!(text.contains("total_value: 0"));
}

// ---------------------------------------------------------------------------
// Test: an unsupported report type persists a Failed record, no file
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unsupported_type_persists_failed_record_without_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path());

    let err = generate(&pool, &store, 1, &request("trading", "alpha_decay", "csv"))
        .await
        .unwrap_err();
    let report_id = match err {
        GenerateError::Generation { report_id } => report_id,
        other => panic!("expected a generation failure, got {other:?}"),
    };

    let report = ReportRepo::find_for_user(&pool, &report_id, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.status_id, ReportStatus::Failed.id());
    assert!(report
        .error_message
        .as_deref()
        .unwrap()
        .contains("Unsupported report type"));
    assert!(report.file_path.is_none());

    // No orphan file under the storage root.
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    assert_eq!(report_count(&pool, Some(ReportStatus::Generating)).await, 0);
}

// ---------------------------------------------------------------------------
// Test: an unsupported format fails the same way
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn unsupported_format_persists_failed_record(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path());

    let err = generate(&pool, &store, 1, &request("trading", "trade_summary", "docx"))
        .await
        .unwrap_err();
    let report_id = match err {
        GenerateError::Generation { report_id } => report_id,
        other => panic!("expected a generation failure, got {other:?}"),
    };

    let report = ReportRepo::find_for_user(&pool, &report_id, 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.status_id, ReportStatus::Failed.id());
    assert!(report
        .error_message
        .as_deref()
        .unwrap()
        .contains("Unsupported report format"));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

// ---------------------------------------------------------------------------
// Test: recognized-but-unimplemented kinds complete as placeholders
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn placeholder_kind_completes(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let store = ReportStore::new(dir.path());

    let report = generate(&pool, &store, 1, &request("risk", "var_breakdown", "pdf"))
        .await
        .unwrap();

    assert_eq!(report.status_id, ReportStatus::Completed.id());
    let text = std::fs::read_to_string(report.file_path.as_deref().unwrap()).unwrap();
    assert!(text.contains("not yet implemented"));
}
