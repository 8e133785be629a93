//! Content builders keyed by resolved [`ReportKind`].

pub mod trading;

use sqlx::PgPool;
use tradewind_core::payload::ReportPayload;
use tradewind_core::report::{ReportKind, ValidatedRequest};

/// Build the payload for a resolved report kind.
///
/// Placeholder kinds never touch the database; the trade summary queries
/// the trades table through [`trading`].
pub async fn build(
    pool: &PgPool,
    kind: &ReportKind,
    request: &ValidatedRequest,
) -> Result<ReportPayload, sqlx::Error> {
    match kind {
        ReportKind::TradeSummary => trading::build_trade_summary(pool, request).await,
        ReportKind::Placeholder { title } => {
            Ok(ReportPayload::placeholder(title.clone(), request.period()))
        }
    }
}
