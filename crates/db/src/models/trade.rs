//! Trade rows consumed by the trading content builders (read-only here).

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use tradewind_core::types::{DbId, Timestamp};

/// A row from the `trades` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TradeRow {
    pub id: DbId,
    pub trade_date: NaiveDate,
    pub commodity: String,
    pub trader: String,
    pub counterparty: String,
    pub quantity: f64,
    pub price: f64,
    pub created_at: Timestamp,
}

/// Filter for trade queries: a closed date range plus optional equality
/// filters from the report request.
#[derive(Debug, Clone)]
pub struct TradeFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub commodity: Option<String>,
    pub trader: Option<String>,
}
