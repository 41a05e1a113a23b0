//! CSV parser for the match results file.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{AnalyticsError, Result};
use crate::record::{MatchRecord, MatchResult, Venue};

/// Columns that must be present in the header row. Any others are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "team",
    "opponent",
    "season",
    "round",
    "date",
    "venue",
    "result",
    "gf",
    "ga",
    "xg",
    "xga",
    "poss",
    "formation",
];

/// A single row as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawMatchRow {
    team: String,
    opponent: String,
    season: i32,
    round: String,
    date: String,
    venue: String,
    result: String,
    gf: f64,
    ga: f64,
    xg: f64,
    xga: f64,
    poss: f64,
    formation: String,
}

/// Reads and validates every match row from `reader`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Schema`] when a required column is missing,
/// [`AnalyticsError::Validation`] for out-of-range or unknown values and
/// [`AnalyticsError::Csv`] for cells that do not parse at all.
pub fn parse_matches<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalyticsError::Schema { column });
        }
    }

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let raw: RawMatchRow = result?;
        records.push(validate(idx, raw)?);
    }

    debug!(rows = records.len(), "Parsed match rows");
    Ok(records)
}

/// Opens `path` and parses it with [`parse_matches`].
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_matches(path: &Path) -> Result<Vec<MatchRecord>> {
    let file = File::open(path)?;
    let records = parse_matches(file)?;
    info!(rows = records.len(), "Match file loaded");
    Ok(records)
}

fn validate(row: usize, raw: RawMatchRow) -> Result<MatchRecord> {
    let invalid = |field: &'static str, value: String| AnalyticsError::Validation { row, field, value };

    let team = raw.team.trim().to_string();
    if team.is_empty() {
        return Err(invalid("team", raw.team));
    }
    let opponent = raw.opponent.trim().to_string();
    if opponent.is_empty() {
        return Err(invalid("opponent", raw.opponent));
    }

    let date = parse_date(&raw.date).ok_or_else(|| invalid("date", raw.date.clone()))?;
    let venue = Venue::parse(&raw.venue).ok_or_else(|| invalid("venue", raw.venue.clone()))?;
    let result =
        MatchResult::parse(&raw.result).ok_or_else(|| invalid("result", raw.result.clone()))?;

    let gf = goals(raw.gf).ok_or_else(|| invalid("gf", raw.gf.to_string()))?;
    let ga = goals(raw.ga).ok_or_else(|| invalid("ga", raw.ga.to_string()))?;

    if !raw.xg.is_finite() || raw.xg < 0.0 {
        return Err(invalid("xg", raw.xg.to_string()));
    }
    if !raw.xga.is_finite() || raw.xga < 0.0 {
        return Err(invalid("xga", raw.xga.to_string()));
    }
    if !(0.0..=100.0).contains(&raw.poss) {
        return Err(invalid("poss", raw.poss.to_string()));
    }

    Ok(MatchRecord {
        team,
        opponent,
        season: raw.season,
        round: raw.round,
        date,
        venue,
        result,
        gf,
        ga,
        xg: raw.xg,
        xga: raw.xga,
        poss: raw.poss,
        formation: raw.formation.trim().to_string(),
    })
}

/// Accepts a plain date or a date followed by a time component.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let day = value.split([' ', 'T']).next().unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Goal counts are sometimes exported as floats ("2.0"); they must still be
/// whole and non-negative.
fn goals(value: f64) -> Option<u32> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
