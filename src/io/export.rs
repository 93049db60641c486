//! Export a merged bundle to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per date, one column per series, blanks (CSV) or `null` (JSON) for
//! missing values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cli::ExportFormat;
use crate::domain::MergedBundle;
use crate::error::AppError;

/// Pick the export format: explicit flag first, then the file extension, then CSV.
pub fn resolve_format(path: &Path, explicit: Option<ExportFormat>) -> ExportFormat {
    explicit.unwrap_or_else(|| match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
        _ => ExportFormat::Csv,
    })
}

/// Write `bundle` to `path` in the given format.
pub fn write_bundle(path: &Path, format: ExportFormat, bundle: &MergedBundle) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create export file '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(&mut out, bundle)?,
        ExportFormat::Json => write_json(&mut out, bundle)?,
    }
    out.flush()
        .map_err(|e| AppError::config(format!("Failed to write export file '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), rows = bundle.dates.len(), "wrote export");
    Ok(())
}

/// CSV with a `date` column followed by one column per series id.
pub fn write_csv<W: Write>(out: &mut W, bundle: &MergedBundle) -> Result<(), AppError> {
    let mut header = String::from("date");
    for s in &bundle.series {
        header.push(',');
        header.push_str(&csv_field(&s.id));
    }
    writeln!(out, "{header}").map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for (i, date) in bundle.dates.iter().enumerate() {
        let mut row = date.clone();
        for s in &bundle.series {
            row.push(',');
            if let Some(v) = s.values[i] {
                row.push_str(&v.to_string());
            }
        }
        writeln!(out, "{row}").map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }
    Ok(())
}

/// Pretty-printed JSON of the bundle (`{dates, series}`).
pub fn write_json<W: Write>(out: &mut W, bundle: &MergedBundle) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, bundle)
        .map_err(|e| AppError::config(format!("Failed to write export JSON: {e}")))?;
    writeln!(out).map_err(|e| AppError::config(format!("Failed to write export JSON: {e}")))
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
