//! Derived per-row features: points, goal difference, match week and rolling
//! expected-goals form.

use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{AnalyticsError, Result};
use crate::record::MatchRecord;

/// Number of matches in the trailing xG/xGA window.
pub const ROLLING_WINDOW: usize = 5;

/// What to do with a row whose round label carries no match week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundPolicy {
    #[default]
    Fail,
    Skip,
}

impl FromStr for RoundPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(RoundPolicy::Fail),
            "skip" => Ok(RoundPolicy::Skip),
            other => Err(format!("unknown round policy '{other}' (expected fail or skip)")),
        }
    }
}

/// Which rows share a rolling window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollingScope {
    /// One window per team, carried across seasons.
    #[default]
    Team,
    /// The window restarts at the first match of every season.
    TeamSeason,
}

impl FromStr for RollingScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "team" => Ok(RollingScope::Team),
            "team-season" | "team_season" => Ok(RollingScope::TeamSeason),
            other => Err(format!(
                "unknown rolling scope '{other}' (expected team or team-season)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeriveOptions {
    pub round_policy: RoundPolicy,
    pub rolling_scope: RollingScope,
}

/// A match record together with the columns derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMatch {
    pub record: MatchRecord,
    pub goal_difference: i32,
    pub points: u8,
    pub match_week: u32,
    pub rolling_xg_5: f64,
    pub rolling_xga_5: f64,
}

/// A row dropped under [`RoundPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// Position in the input sequence (0-based).
    pub index: usize,
    pub team: String,
    pub round: String,
}

#[derive(Debug, Clone, Default)]
pub struct Derived {
    pub rows: Vec<DerivedMatch>,
    pub skipped: Vec<SkippedRow>,
}

/// Extracts the first run of decimal digits from a round label, e.g.
/// `"Matchweek 7"` gives `7`. Returns `None` when there are no digits or the
/// number is zero.
pub fn parse_match_week(round: &str) -> Option<u32> {
    let start = round.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &round[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(week) => Some(week),
    }
}

/// Trailing mean over at most `window` values, using however many are
/// available at the start of the series.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let n = (i + 1).min(window);
        out.push(sum / n as f64);
    }
    out
}

/// Derives features for every record. The input is left untouched.
///
/// Output rows are ordered by team, season, match week and date. Rolling
/// windows are computed per team (or per team and season, see
/// [`RollingScope`]) in that order.
///
/// # Errors
///
/// Returns [`AnalyticsError::Parse`] for a round label without a match week
/// unless [`RoundPolicy::Skip`] is set.
pub fn derive_features(records: &[MatchRecord], options: &DeriveOptions) -> Result<Derived> {
    let mut rows = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let Some(match_week) = parse_match_week(&record.round) else {
            match options.round_policy {
                RoundPolicy::Fail => {
                    return Err(AnalyticsError::Parse {
                        row: index,
                        round: record.round.clone(),
                    });
                }
                RoundPolicy::Skip => {
                    warn!(index, team = %record.team, round = %record.round, "Skipping row without match week");
                    skipped.push(SkippedRow {
                        index,
                        team: record.team.clone(),
                        round: record.round.clone(),
                    });
                    continue;
                }
            }
        };

        rows.push(DerivedMatch {
            record: record.clone(),
            goal_difference: record.gf as i32 - record.ga as i32,
            points: record.result.points(),
            match_week,
            rolling_xg_5: 0.0,
            rolling_xga_5: 0.0,
        });
    }

    rows.sort_by(|a, b| {
        a.record
            .team
            .cmp(&b.record.team)
            .then(a.record.season.cmp(&b.record.season))
            .then(a.match_week.cmp(&b.match_week))
            .then(a.record.date.cmp(&b.record.date))
    });

    apply_rolling(&mut rows, options.rolling_scope);

    debug!(
        rows = rows.len(),
        skipped = skipped.len(),
        "Derived match features"
    );
    Ok(Derived { rows, skipped })
}

fn same_group(a: &DerivedMatch, b: &DerivedMatch, scope: RollingScope) -> bool {
    match scope {
        RollingScope::Team => a.record.team == b.record.team,
        RollingScope::TeamSeason => {
            a.record.team == b.record.team && a.record.season == b.record.season
        }
    }
}

/// Fills the rolling columns of rows already sorted by group.
fn apply_rolling(rows: &mut [DerivedMatch], scope: RollingScope) {
    let mut start = 0;
    while start < rows.len() {
        let mut end = start + 1;
        while end < rows.len() && same_group(&rows[start], &rows[end], scope) {
            end += 1;
        }

        let group = &mut rows[start..end];
        let xg: Vec<f64> = group.iter().map(|r| r.record.xg).collect();
        let xga: Vec<f64> = group.iter().map(|r| r.record.xga).collect();
        let rolling_xg = rolling_mean(&xg, ROLLING_WINDOW);
        let rolling_xga = rolling_mean(&xga, ROLLING_WINDOW);
        for (row, (rx, rxa)) in group.iter_mut().zip(rolling_xg.into_iter().zip(rolling_xga)) {
            row.rolling_xg_5 = rx;
            row.rolling_xga_5 = rxa;
        }

        start = end;
    }
}
