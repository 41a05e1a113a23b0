use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::types::LeagueTableRow;
use crate::error::SelectionError;
use crate::snapshot::MatchTable;

#[derive(Default)]
struct Totals {
    matches: u32,
    points: u32,
    gf: u32,
    ga: u32,
}

/// Builds the league table for `season`.
///
/// Teams are ordered by points, then goal difference, both descending. Teams
/// still level keep alphabetical order. Positions run 1..=N with no gaps.
///
/// # Errors
///
/// Returns [`SelectionError::EmptySeason`] when the season has no matches.
pub fn league_table(
    table: &MatchTable,
    season: i32,
) -> Result<Vec<LeagueTableRow>, SelectionError> {
    let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();

    for row in table.season_rows(season) {
        let t = totals.entry(row.record.team.as_str()).or_default();
        t.matches += 1;
        t.points += row.points as u32;
        t.gf += row.record.gf;
        t.ga += row.record.ga;
    }

    if totals.is_empty() {
        return Err(SelectionError::EmptySeason { season });
    }

    let mut rows: Vec<LeagueTableRow> = totals
        .into_iter()
        .map(|(team, t)| LeagueTableRow {
            position: 0,
            team: team.to_string(),
            matches: t.matches,
            points: t.points,
            gf: t.gf,
            ga: t.ga,
            goal_difference: t.gf as i32 - t.ga as i32,
        })
        .collect();

    // sort_by is stable
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i + 1;
    }

    debug!(season, teams = rows.len(), "League table built");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{fixture, sample_table, table};

    #[test]
    fn test_sample_season_order() {
        let rows = league_table(&sample_table(), 2025).unwrap();
        let order: Vec<(usize, &str, u32, i32)> = rows
            .iter()
            .map(|r| (r.position, r.team.as_str(), r.points, r.goal_difference))
            .collect();
        assert_eq!(order, vec![(1, "A", 7, 4), (2, "B", 5, 1), (3, "C", 4, -5)]);
        assert_eq!(rows[0].matches, 4);
        assert_eq!((rows[0].gf, rows[0].ga), (9, 5));
    }

    #[test]
    fn test_goal_difference_breaks_points_tie() {
        // A: 6 pts, gd +2. B: 6 pts, gd +5.
        let t = table(&[
            fixture(2025, 1, "A", "X", 2, 1),
            fixture(2025, 2, "A", "Y", 2, 1),
            fixture(2025, 1, "B", "Y", 4, 0),
            fixture(2025, 2, "B", "X", 2, 1),
        ]);
        let rows = league_table(&t, 2025).unwrap();
        let a = rows.iter().find(|r| r.team == "A").unwrap();
        let b = rows.iter().find(|r| r.team == "B").unwrap();
        assert_eq!((a.points, a.goal_difference), (6, 2));
        assert_eq!((b.points, b.goal_difference), (6, 5));
        assert_eq!(b.position, 1);
        assert_eq!(a.position, 2);
    }

    #[test]
    fn test_full_tie_keeps_alphabetical_order() {
        let t = table(&[fixture(2025, 1, "Zeta", "Alpha", 1, 1)]);
        let rows = league_table(&t, 2025).unwrap();
        assert_eq!(rows[0].team, "Alpha");
        assert_eq!(rows[1].team, "Zeta");
    }

    #[test]
    fn test_positions_are_a_permutation_consistent_with_sort_key() {
        let rows = league_table(&sample_table(), 2025).unwrap();
        let mut positions: Vec<usize> = rows.iter().map(|r| r.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, (1..=rows.len()).collect::<Vec<_>>());
        for pair in rows.windows(2) {
            assert!(
                (pair[0].points, pair[0].goal_difference) >= (pair[1].points, pair[1].goal_difference)
            );
        }
    }

    #[test]
    fn test_empty_season_is_an_error() {
        let err = league_table(&sample_table(), 1999).unwrap_err();
        assert_eq!(err, SelectionError::EmptySeason { season: 1999 });
    }

    #[test]
    fn test_is_idempotent() {
        let t = sample_table();
        assert_eq!(league_table(&t, 2025), league_table(&t, 2025));
    }
}
