//! Trading content builders.
//!
//! `trade_summary` is the one fully implemented report: aggregate count,
//! volume, and notional value over the filtered trade set, with one
//! detail row per trade, newest-first (the repository orders them).

use indexmap::IndexMap;
use sqlx::PgPool;
use tradewind_core::payload::{CellValue, ReportPayload, Row};
use tradewind_core::report::ValidatedRequest;
use tradewind_db::models::trade::{TradeFilter, TradeRow};
use tradewind_db::repositories::TradeRepo;

/// Build the trade summary payload for a validated request.
pub async fn build_trade_summary(
    pool: &PgPool,
    request: &ValidatedRequest,
) -> Result<ReportPayload, sqlx::Error> {
    let filter = TradeFilter {
        start: request.start,
        end: request.end,
        commodity: request.commodity.clone(),
        trader: request.trader.clone(),
    };
    let trades = TradeRepo::search(pool, &filter).await?;
    Ok(summarize_trades(&trades, request.period()))
}

/// Assemble the payload from an already-fetched trade set.
///
/// Zero trades is a legitimate report: the aggregates are all zero and
/// the detail section is empty.
pub fn summarize_trades(trades: &[TradeRow], period: String) -> ReportPayload {
    let total_volume: f64 = trades.iter().map(|t| t.quantity).sum();
    let total_value: f64 = trades.iter().map(|t| t.quantity * t.price).sum();

    let mut summary = IndexMap::new();
    summary.insert(
        "total_trades".to_string(),
        CellValue::Int(trades.len() as i64),
    );
    summary.insert("total_volume".to_string(), CellValue::Number(total_volume));
    summary.insert("total_value".to_string(), CellValue::Number(total_value));

    let rows: Vec<Row> = trades.iter().map(trade_row).collect();

    ReportPayload {
        title: "Trade Summary".to_string(),
        period,
        summary: Some(summary),
        rows,
        generated_at: chrono::Utc::now(),
    }
}

fn trade_row(trade: &TradeRow) -> Row {
    let mut row = IndexMap::new();
    row.insert("trade_id".to_string(), CellValue::Int(trade.id));
    row.insert("trade_date".to_string(), CellValue::Date(trade.trade_date));
    row.insert(
        "commodity".to_string(),
        CellValue::Text(trade.commodity.clone()),
    );
    row.insert("trader".to_string(), CellValue::Text(trade.trader.clone()));
    row.insert(
        "counterparty".to_string(),
        CellValue::Text(trade.counterparty.clone()),
    );
    row.insert("quantity".to_string(), CellValue::Number(trade.quantity));
    row.insert("price".to_string(), CellValue::Number(trade.price));
    row.insert(
        "value".to_string(),
        CellValue::Number(trade.quantity * trade.price),
    );
    row
}
