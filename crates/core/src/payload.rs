//! In-memory report payload model.
//!
//! A [`ReportPayload`] is produced by a content builder and consumed by a
//! format encoder; it is never persisted. Rows are ordered maps so the
//! column order chosen by the builder survives into the encoded output.

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::types::Timestamp;

/// A single cell in a detail row or summary map.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Number(f64),
    Date(NaiveDate),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// One detail row: ordered column name to value.
pub type Row = IndexMap<String, CellValue>;

/// Structured report content handed from builder to encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    pub title: String,
    /// Human-readable period, e.g. `"2024-03-01 to 2024-03-10"`.
    pub period: String,
    /// Optional aggregate metrics rendered above the detail section.
    pub summary: Option<IndexMap<String, CellValue>>,
    /// Ordered detail rows; empty is a legitimate payload.
    pub rows: Vec<Row>,
    pub generated_at: Timestamp,
}

impl ReportPayload {
    /// A payload with headers only, used for recognized-but-unimplemented
    /// report types.
    pub fn placeholder(title: impl Into<String>, period: impl Into<String>) -> Self {
        let mut summary = IndexMap::new();
        summary.insert(
            "note".to_string(),
            CellValue::Text("This report type is not yet implemented".to_string()),
        );
        ReportPayload {
            title: title.into(),
            period: period.into(),
            summary: Some(summary),
            rows: Vec::new(),
            generated_at: chrono::Utc::now(),
        }
    }
}
