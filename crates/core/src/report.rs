//! Report request validation, kind resolution, and file naming.
//!
//! A request is validated *before* anything is persisted (missing fields
//! and malformed dates are client errors). Category/type/format
//! resolution is deliberately a separate, later step: an unrecognized
//! combination is a generation failure that must leave a `failed`
//! record, not a validation rejection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Report categories exposed to callers.
pub const CATEGORY_TRADING: &str = "trading";
/// Operations reports (shipments, inventory, logistics).
pub const CATEGORY_OPERATIONS: &str = "operations";
/// Risk reports.
pub const CATEGORY_RISK: &str = "risk";
/// Financial reports.
pub const CATEGORY_FINANCIAL: &str = "financial";
/// Regulatory reports.
pub const CATEGORY_REGULATORY: &str = "regulatory";

/// All valid report categories.
pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_TRADING,
    CATEGORY_OPERATIONS,
    CATEGORY_RISK,
    CATEGORY_FINANCIAL,
    CATEGORY_REGULATORY,
];

/// Trading report types with a registered builder.
pub const TRADING_TYPES: &[&str] = &[
    "trade_summary",
    "pnl_report",
    "volume_analysis",
    "performance_metrics",
    "position_report",
];

/// Operations report types with a registered builder.
pub const OPERATIONS_TYPES: &[&str] = &[
    "shipment_tracking",
    "inventory_summary",
    "delivery_performance",
];

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

/// Requested output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    /// Textual surrogate; no real PDF rendering.
    Pdf,
    /// CSV bytes under an `.xlsx` extension; no real spreadsheet container.
    Excel,
}

impl ReportFormat {
    /// Resolve a caller-supplied format string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" => Ok(ReportFormat::Excel),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }

    /// File extension for the rendered output.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    /// MIME type served on download.
    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Kind resolution
// ---------------------------------------------------------------------------

/// A recognized (category, report_type) combination mapped to a builder.
///
/// Closed set: anything not representable here is an unsupported
/// combination and fails generation with a persisted `failed` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    /// Trade summary over the trades table. The only fully implemented
    /// builder; everything else renders a placeholder payload.
    TradeSummary,
    /// Recognized report type whose builder is not yet implemented.
    /// Still a legitimate terminal payload, not an error.
    Placeholder { title: String },
}

/// Resolve a (category, report_type) pair to a [`ReportKind`].
///
/// Trading and operations accept only their registered types. Risk,
/// financial, and regulatory currently resolve every report type to a
/// placeholder.
pub fn resolve_kind(category: &str, report_type: &str) -> Result<ReportKind, CoreError> {
    let unsupported = || CoreError::UnsupportedReportType {
        category: category.to_string(),
        report_type: report_type.to_string(),
    };

    match category {
        CATEGORY_TRADING => {
            if report_type == "trade_summary" {
                Ok(ReportKind::TradeSummary)
            } else if TRADING_TYPES.contains(&report_type) {
                Ok(ReportKind::Placeholder {
                    title: display_title(report_type),
                })
            } else {
                Err(unsupported())
            }
        }
        CATEGORY_OPERATIONS => {
            if OPERATIONS_TYPES.contains(&report_type) {
                Ok(ReportKind::Placeholder {
                    title: display_title(report_type),
                })
            } else {
                Err(unsupported())
            }
        }
        CATEGORY_RISK | CATEGORY_FINANCIAL | CATEGORY_REGULATORY => Ok(ReportKind::Placeholder {
            title: display_title(report_type),
        }),
        _ => Err(unsupported()),
    }
}

/// Human-readable title for a snake_case report type.
fn display_title(report_type: &str) -> String {
    match report_type {
        "trade_summary" => "Trade Summary".to_string(),
        "pnl_report" => "P&L Report".to_string(),
        "volume_analysis" => "Volume Analysis".to_string(),
        "performance_metrics" => "Performance Metrics".to_string(),
        "position_report" => "Position Report".to_string(),
        other => {
            // Title-case each underscore-separated word.
            other
                .split('_')
                .filter(|w| !w.is_empty())
                .map(|w| {
                    let mut chars = w.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Raw report generation request as received from the caller.
///
/// Required fields default to empty strings on deserialization so a
/// missing field surfaces as a 400 validation error rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub report_type: String,
    #[serde(default)]
    pub report_format: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    /// Optional commodity filter (e.g. `"crude_oil"`).
    #[serde(default)]
    pub commodity: Option<String>,
    /// Optional trader filter.
    #[serde(default)]
    pub trader: Option<String>,
}

/// A report request that passed field and date validation.
///
/// Category, type, and format are still raw strings here; resolving them
/// happens after the `generating` record is persisted.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub category: String,
    pub report_type: String,
    pub format: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub commodity: Option<String>,
    pub trader: Option<String>,
}

impl ValidatedRequest {
    /// Human-readable period string used in payload headers.
    pub fn period(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

impl ReportRequest {
    /// Validate required fields and the date range.
    pub fn validate(&self) -> Result<ValidatedRequest, CoreError> {
        for (field, value) in [
            ("category", &self.category),
            ("report_type", &self.report_type),
            ("report_format", &self.report_format),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::Validation(format!("{field} is required")));
            }
        }

        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;

        if start > end {
            return Err(CoreError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }

        Ok(ValidatedRequest {
            category: self.category.trim().to_string(),
            report_type: self.report_type.trim().to_string(),
            format: self.report_format.trim().to_string(),
            start,
            end,
            commodity: normalize_filter(&self.commodity),
            trader: normalize_filter(&self.trader),
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("{field} must be a valid date (YYYY-MM-DD)"))
    })
}

/// Treat blank filter strings the same as absent ones.
fn normalize_filter(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Identifiers and file naming
// ---------------------------------------------------------------------------

/// Generate a candidate report id (`RPT-<uuid>`); uniqueness is checked
/// against the reports table by the caller.
pub fn new_report_id() -> String {
    format!("RPT-{}", uuid::Uuid::new_v4().simple())
}

/// Generate a candidate schedule id (`SCH-<uuid>`).
pub fn new_schedule_id() -> String {
    format!("SCH-{}", uuid::Uuid::new_v4().simple())
}

/// Derive the output file name for a report.
///
/// Includes a millisecond generation timestamp so repeated identical
/// requests never collide on file name. Falls back to the raw format
/// string as the extension when the format is unrecognized (the request
/// will fail before anything is written under that name).
pub fn derive_file_name(
    report_type: &str,
    format: &str,
    start: NaiveDate,
    end: NaiveDate,
    generated_at: crate::types::Timestamp,
) -> String {
    let extension = ReportFormat::parse(format)
        .map(ReportFormat::extension)
        .unwrap_or(format)
        .to_string();
    format!(
        "{report_type}_{format}_{}_{}_{}.{extension}",
        start.format("%Y%m%d"),
        end.format("%Y%m%d"),
        generated_at.format("%Y%m%d%H%M%S%3f"),
    )
}
