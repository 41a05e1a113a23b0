//! Immutable, derived view of the match file shared by every aggregation.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::features::{DeriveOptions, DerivedMatch, SkippedRow, derive_features};
use crate::parser::load_matches;
use crate::record::MatchRecord;

/// Derived match rows, built once and then only read.
///
/// Rows are ordered by team, season, match week and date, so any per-team
/// filter is already chronological.
#[derive(Debug, Clone, Default)]
pub struct MatchTable {
    rows: Vec<DerivedMatch>,
    skipped: Vec<SkippedRow>,
}

impl MatchTable {
    pub fn from_records(records: &[MatchRecord], options: &DeriveOptions) -> Result<Self> {
        let derived = derive_features(records, options)?;
        Ok(Self {
            rows: derived.rows,
            skipped: derived.skipped,
        })
    }

    /// Loads the CSV at `path` and derives features for it.
    pub fn load(path: &Path, options: &DeriveOptions) -> Result<Self> {
        let records = load_matches(path)?;
        let table = Self::from_records(&records, options)?;
        info!(
            rows = table.rows.len(),
            skipped = table.skipped.len(),
            seasons = table.seasons().len(),
            "Match table ready"
        );
        Ok(table)
    }

    pub fn rows(&self) -> &[DerivedMatch] {
        &self.rows
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct seasons, ascending.
    pub fn seasons(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.rows.iter().map(|r| r.record.season).collect();
        set.into_iter().collect()
    }

    pub fn latest_season(&self) -> Option<i32> {
        self.rows.iter().map(|r| r.record.season).max()
    }

    /// Distinct teams with at least one match in `season`, sorted by name.
    pub fn teams(&self, season: i32) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .season_rows(season)
            .map(|r| r.record.team.as_str())
            .collect();
        set.into_iter().collect()
    }

    pub fn season_rows(&self, season: i32) -> impl Iterator<Item = &DerivedMatch> + '_ {
        self.rows.iter().filter(move |r| r.record.season == season)
    }

    /// The team's matches in `season`, in chronological order.
    pub fn team_rows(&self, team: &str, season: i32) -> Vec<&DerivedMatch> {
        self.rows
            .iter()
            .filter(|r| r.record.season == season && r.record.team == team)
            .collect()
    }
}
