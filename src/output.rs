//! Output formatting and persistence for aggregation results.
//!
//! Supports pretty-printed JSON and flat CSV files, the two shapes a charting
//! front end reads directly.

use anyhow::Result;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use csv::WriterBuilder;

/// File format for exported views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown format '{other}' (expected csv or json)")),
        }
    }
}

/// Serializes any value as pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `rows` to `path` as CSV with a header line, replacing any existing
/// file.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes `rows` to `path` as a pretty-printed JSON array.
pub fn write_json<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing JSON");
    std::fs::write(path, to_json(rows)?)?;
    Ok(())
}

/// Writes `rows` in the requested format.
pub fn export<T: Serialize>(path: &Path, rows: &[T], format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(path, rows)?,
        ExportFormat::Json => write_json(path, rows)?,
    }
    info!(path = %path.display(), rows = rows.len(), ?format, "Export written");
    Ok(())
}
