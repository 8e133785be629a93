//! Read-only repository over the `trades` table for content builders.

use sqlx::PgPool;

use crate::models::trade::{TradeFilter, TradeRow};

/// Column list for `trades` queries.
const COLUMNS: &str =
    "id, trade_date, commodity, trader, counterparty, quantity, price, created_at";

/// Query access to the transactional trade data.
pub struct TradeRepo;

impl TradeRepo {
    /// Fetch trades in the closed date range, optionally filtered by
    /// commodity and trader, newest-first.
    pub async fn search(pool: &PgPool, filter: &TradeFilter) -> Result<Vec<TradeRow>, sqlx::Error> {
        // Build the WHERE clause and track the next bind parameter index.
        let mut conditions = vec![
            "trade_date >= $1".to_string(),
            "trade_date <= $2".to_string(),
        ];
        let mut bind_idx: u32 = 3;

        if filter.commodity.is_some() {
            conditions.push(format!("commodity = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.trader.is_some() {
            conditions.push(format!("trader = ${bind_idx}"));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM trades \
             WHERE {} \
             ORDER BY trade_date DESC, created_at DESC",
            conditions.join(" AND "),
        );

        let mut q = sqlx::query_as::<_, TradeRow>(&query)
            .bind(filter.start)
            .bind(filter.end);

        if let Some(commodity) = &filter.commodity {
            q = q.bind(commodity);
        }
        if let Some(trader) = &filter.trader {
            q = q.bind(trader);
        }

        q.fetch_all(pool).await
    }
}
