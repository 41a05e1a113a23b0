use crate::analyzers::types::{SplitStats, TeamSummary};
use crate::analyzers::utility::mean_by;
use crate::error::SelectionError;
use crate::features::DerivedMatch;
use crate::record::{MatchResult, Venue};
use crate::snapshot::MatchTable;

/// Totals and xG means over `rows`. An empty slice gives all zeros.
pub fn split_stats(rows: &[&DerivedMatch]) -> SplitStats {
    let mut s = SplitStats {
        matches: rows.len() as u32,
        avg_xg: mean_by(rows, |r| r.record.xg),
        avg_xga: mean_by(rows, |r| r.record.xga),
        ..Default::default()
    };

    for r in rows {
        match r.record.result {
            MatchResult::W => s.wins += 1,
            MatchResult::D => s.draws += 1,
            MatchResult::L => s.losses += 1,
        }
        s.points += r.points as u32;
        s.gf += r.record.gf;
        s.ga += r.record.ga;
    }

    s
}

/// Summarises `team`'s season, overall and split by venue.
///
/// # Errors
///
/// Returns [`SelectionError::TeamNotFound`] when the team has no matches in
/// `season`. A returned summary always has at least one match; its home or
/// away split may be empty.
pub fn team_summary(
    table: &MatchTable,
    team: &str,
    season: i32,
) -> Result<TeamSummary, SelectionError> {
    let rows = table.team_rows(team, season);
    if rows.is_empty() {
        return Err(SelectionError::TeamNotFound {
            team: team.to_string(),
            season,
        });
    }

    let (home, away): (Vec<&DerivedMatch>, Vec<&DerivedMatch>) =
        rows.iter().copied().partition(|r| r.record.venue == Venue::Home);

    Ok(TeamSummary {
        team: team.to_string(),
        season,
        total: split_stats(&rows),
        home: split_stats(&home),
        away: split_stats(&away),
    })
}
