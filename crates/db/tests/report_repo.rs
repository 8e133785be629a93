//! Integration tests for `ReportRepo`: lifecycle transitions and
//! ownership scoping against a real Postgres schema.

use chrono::NaiveDate;
use sqlx::PgPool;

use tradewind_db::models::report::CreateReport;
use tradewind_db::models::status::ReportStatus;
use tradewind_db::repositories::ReportRepo;

fn create_input(report_id: &str, user_id: i64) -> CreateReport {
    CreateReport {
        report_id: report_id.to_string(),
        user_id,
        category: "trading".to_string(),
        report_type: "trade_summary".to_string(),
        format: "csv".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        file_name: format!("{report_id}.csv"),
        parameters: serde_json::json!({}),
    }
}

// ---------------------------------------------------------------------------
// Test: create inserts a Generating record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_starts_in_generating(pool: PgPool) {
    let report = ReportRepo::create(&pool, &create_input("RPT-a", 1))
        .await
        .unwrap();

    assert_eq!(report.status_id, ReportStatus::Generating.id());
    assert!(report.file_path.is_none());
    assert!(report.error_message.is_none());

    assert!(ReportRepo::exists(&pool, "RPT-a").await.unwrap());
    assert!(!ReportRepo::exists(&pool, "RPT-missing").await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: the Completed transition is single-shot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn completed_transition_is_single_shot(pool: PgPool) {
    ReportRepo::create(&pool, &create_input("RPT-b", 1))
        .await
        .unwrap();

    assert!(ReportRepo::mark_completed(&pool, "RPT-b", "/tmp/RPT-b.csv")
        .await
        .unwrap());

    // Already terminal: neither transition may fire again.
    assert!(!ReportRepo::mark_completed(&pool, "RPT-b", "/tmp/other.csv")
        .await
        .unwrap());
    assert!(!ReportRepo::mark_failed(&pool, "RPT-b", "late failure")
        .await
        .unwrap());

    let report = ReportRepo::find_for_user(&pool, "RPT-b", 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.status_id, ReportStatus::Completed.id());
    assert_eq!(report.file_path.as_deref(), Some("/tmp/RPT-b.csv"));
    assert!(report.error_message.is_none());
}

// ---------------------------------------------------------------------------
// Test: the Failed transition records the message and stays terminal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn failed_transition_records_message(pool: PgPool) {
    ReportRepo::create(&pool, &create_input("RPT-c", 1))
        .await
        .unwrap();

    assert!(ReportRepo::mark_failed(&pool, "RPT-c", "builder exploded")
        .await
        .unwrap());
    assert!(!ReportRepo::mark_completed(&pool, "RPT-c", "/tmp/RPT-c.csv")
        .await
        .unwrap());

    let report = ReportRepo::find_for_user(&pool, "RPT-c", 1)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.status_id, ReportStatus::Failed.id());
    assert_eq!(report.error_message.as_deref(), Some("builder exploded"));
    assert!(report.file_path.is_none());
}

// ---------------------------------------------------------------------------
// Test: lookups are scoped to the owner
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn find_is_scoped_to_owner(pool: PgPool) {
    ReportRepo::create(&pool, &create_input("RPT-d", 1))
        .await
        .unwrap();

    assert!(ReportRepo::find_for_user(&pool, "RPT-d", 1)
        .await
        .unwrap()
        .is_some());
    // Another user's id behaves exactly like a missing one.
    assert!(ReportRepo::find_for_user(&pool, "RPT-d", 2)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: delete requires ownership and reports whether a row was removed
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn delete_is_scoped_to_owner(pool: PgPool) {
    ReportRepo::create(&pool, &create_input("RPT-e", 1))
        .await
        .unwrap();

    assert!(!ReportRepo::delete(&pool, "RPT-e", 2).await.unwrap());
    assert!(ReportRepo::exists(&pool, "RPT-e").await.unwrap());

    assert!(ReportRepo::delete(&pool, "RPT-e", 1).await.unwrap());
    assert!(!ReportRepo::exists(&pool, "RPT-e").await.unwrap());

    // Second delete finds nothing.
    assert!(!ReportRepo::delete(&pool, "RPT-e", 1).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: listing is per-user, newest-first, and honours the limit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_recent_orders_and_limits(pool: PgPool) {
    for (id, user_id, age_hours) in [
        ("RPT-old", 1, 3),
        ("RPT-mid", 1, 2),
        ("RPT-new", 1, 1),
        ("RPT-other", 2, 1),
    ] {
        ReportRepo::create(&pool, &create_input(id, user_id))
            .await
            .unwrap();
        // Spread creation times so the ordering is deterministic.
        sqlx::query("UPDATE reports SET created_at = NOW() - ($2 || ' hours')::interval WHERE report_id = $1")
            .bind(id)
            .bind(age_hours.to_string())
            .execute(&pool)
            .await
            .unwrap();
    }

    let all = ReportRepo::list_recent(&pool, 1, None).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["RPT-new", "RPT-mid", "RPT-old"]);
    assert_eq!(all[0].status, "generating");

    let limited = ReportRepo::list_recent(&pool, 1, Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, "RPT-new");
}
