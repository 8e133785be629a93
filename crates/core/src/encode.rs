//! Format encoders: serialize a [`ReportPayload`] into output bytes.
//!
//! CSV is the real encoder. "Excel" reuses the CSV bytes under an
//! `.xlsx` extension and "PDF" renders a plain-text block; both
//! surrogates are deliberate simplifications carried over from the
//! source system rather than real container formats.

use std::fmt::Write as _;

use crate::error::CoreError;
use crate::payload::ReportPayload;
use crate::report::ReportFormat;

/// Encode a payload for the requested format.
pub fn encode(payload: &ReportPayload, format: ReportFormat) -> Result<Vec<u8>, CoreError> {
    match format {
        ReportFormat::Csv | ReportFormat::Excel => encode_csv(payload),
        ReportFormat::Pdf => Ok(encode_pdf_text(payload)),
    }
}

/// CSV layout: metadata rows, a blank separator line, then (only when
/// detail rows exist) a header row from the first row's keys and one
/// record per row in that column order.
///
/// The separator is written between two writer passes: the csv crate
/// renders a single empty field as `""`, not as a blank line.
fn encode_csv(payload: &ReportPayload) -> Result<Vec<u8>, CoreError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);

    write_record(&mut writer, &["Title".to_string(), payload.title.clone()])?;
    write_record(&mut writer, &["Period".to_string(), payload.period.clone()])?;
    write_record(
        &mut writer,
        &[
            "Generated".to_string(),
            payload.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ],
    )?;

    let mut out = finish_csv(writer)?;
    out.push(b'\n');

    if let Some(first) = payload.rows.first() {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

        let columns: Vec<String> = first.keys().cloned().collect();
        write_record(&mut writer, &columns)?;

        for row in &payload.rows {
            let record: Vec<String> = columns
                .iter()
                .map(|col| row.get(col).map(ToString::to_string).unwrap_or_default())
                .collect();
            write_record(&mut writer, &record)?;
        }

        out = finish_csv(writer)?;
    }

    Ok(out)
}

fn write_record(writer: &mut csv::Writer<Vec<u8>>, record: &[String]) -> Result<(), CoreError> {
    writer
        .write_record(record)
        .map_err(|e| CoreError::Internal(format!("CSV encoding failed: {e}")))
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, CoreError> {
    writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV encoding failed: {e}")))
}

/// Plain-text stand-in for PDF output: title block plus the summary
/// section when present. Detail rows are not rendered.
fn encode_pdf_text(payload: &ReportPayload) -> Vec<u8> {
    let mut out = String::new();
    let _ = writeln!(out, "{}", payload.title);
    let _ = writeln!(out, "Period: {}", payload.period);
    let _ = writeln!(
        out,
        "Generated: {}",
        payload.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(summary) = &payload.summary {
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary");
        let _ = writeln!(out, "-------");
        for (key, value) in summary {
            let _ = writeln!(out, "{key}: {value}");
        }
    }

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use indexmap::IndexMap;

    use super::*;
    use crate::payload::CellValue;

    fn payload_with_rows() -> ReportPayload {
        let mut summary = IndexMap::new();
        summary.insert("total_trades".to_string(), CellValue::Int(2));

        let mut row1 = IndexMap::new();
        row1.insert("commodity".to_string(), CellValue::Text("WTI".into()));
        row1.insert("quantity".to_string(), CellValue::Number(100.0));

        let mut row2 = IndexMap::new();
        row2.insert("commodity".to_string(), CellValue::Text("Brent".into()));
        row2.insert("quantity".to_string(), CellValue::Number(50.5));

        ReportPayload {
            title: "Trade Summary".to_string(),
            period: "2024-03-01 to 2024-03-10".to_string(),
            summary: Some(summary),
            rows: vec![row1, row2],
            generated_at: chrono::Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn csv_includes_metadata_header_and_rows() {
        let bytes = encode(&payload_with_rows(), ReportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Title,Trade Summary");
        assert_eq!(lines[1], "Period,2024-03-01 to 2024-03-10");
        assert!(lines[2].starts_with("Generated,"));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "commodity,quantity");
        assert_eq!(lines[5], "WTI,100");
        assert_eq!(lines[6], "Brent,50.5");
    }

    #[test]
    fn csv_omits_data_section_for_empty_payload() {
        let mut payload = payload_with_rows();
        payload.rows.clear();
        let bytes = encode(&payload, ReportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        // Metadata block and separator only; no header row.
        assert_eq!(text.lines().count(), 4);
        assert!(!text.contains("commodity"));
    }

    #[test]
    fn csv_encoding_is_idempotent() {
        let payload = payload_with_rows();
        let first = encode(&payload, ReportFormat::Csv).unwrap();
        let second = encode(&payload, ReportFormat::Csv).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn excel_bytes_match_csv_bytes() {
        let payload = payload_with_rows();
        assert_eq!(
            encode(&payload, ReportFormat::Excel).unwrap(),
            encode(&payload, ReportFormat::Csv).unwrap()
        );
    }

    #[test]
    fn pdf_text_renders_summary_but_not_rows() {
        let bytes = encode(&payload_with_rows(), ReportFormat::Pdf).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("Trade Summary\n"));
        assert!(text.contains("Period: 2024-03-01 to 2024-03-10"));
        assert!(text.contains("total_trades: 2"));
        assert!(!text.contains("WTI"));
    }

    #[test]
    fn pdf_text_without_summary_has_no_summary_section() {
        let mut payload = payload_with_rows();
        payload.summary = None;
        let bytes = encode(&payload, ReportFormat::Pdf).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("-------"));
        assert!(!text.contains("total_trades"));
    }
}
