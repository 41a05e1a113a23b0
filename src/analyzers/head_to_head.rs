use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::types::HeadToHeadFixture;
use crate::features::DerivedMatch;
use crate::snapshot::MatchTable;

/// Fixtures between `team_a` and `team_b` in `season`, oldest first.
///
/// The input holds each fixture twice, once per side. Each fixture is
/// returned once, keyed by date, and always from `team_a`'s side: its own
/// record is used when present, otherwise `team_b`'s record is mirrored.
/// Returns an empty list when the teams did not meet.
pub fn head_to_head(
    table: &MatchTable,
    team_a: &str,
    team_b: &str,
    season: i32,
) -> Vec<HeadToHeadFixture> {
    if team_a == team_b {
        return Vec::new();
    }

    let mut fixtures: BTreeMap<NaiveDate, HeadToHeadFixture> = BTreeMap::new();

    for r in table.team_rows(team_a, season) {
        if r.record.opponent == team_b {
            fixtures.entry(r.record.date).or_insert_with(|| from_side(r));
        }
    }
    for r in table.team_rows(team_b, season) {
        if r.record.opponent == team_a {
            fixtures
                .entry(r.record.date)
                .or_insert_with(|| from_side(r).mirrored());
        }
    }

    debug!(team_a, team_b, season, fixtures = fixtures.len(), "Head-to-head collected");
    fixtures.into_values().collect()
}

fn from_side(r: &DerivedMatch) -> HeadToHeadFixture {
    HeadToHeadFixture {
        date: r.record.date,
        match_week: r.match_week,
        team_a: r.record.team.clone(),
        team_b: r.record.opponent.clone(),
        venue_a: r.record.venue,
        result_a: r.record.result,
        goals_a: r.record.gf,
        goals_b: r.record.ga,
        xg_a: r.record.xg,
        xg_b: r.record.xga,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{fixture, sample_table, table};
    use crate::record::{MatchResult, Venue};

    #[test]
    fn test_each_fixture_once_from_team_a_side() {
        let fixtures = head_to_head(&sample_table(), "A", "B", 2025);
        assert_eq!(fixtures.len(), 2);

        let first = &fixtures[0];
        assert_eq!(first.match_week, 1);
        assert_eq!((first.team_a.as_str(), first.team_b.as_str()), ("A", "B"));
        assert_eq!((first.goals_a, first.goals_b), (3, 1));
        assert_eq!(first.venue_a, Venue::Home);
        assert_eq!(first.result_a, MatchResult::W);

        let second = &fixtures[1];
        assert_eq!(second.match_week, 4);
        assert_eq!((second.goals_a, second.goals_b), (2, 2));
        assert_eq!(second.venue_a, Venue::Away);
    }

    #[test]
    fn test_count_is_half_the_raw_rows() {
        let table = sample_table();
        let raw = table
            .season_rows(2025)
            .filter(|r| {
                (r.record.team == "A" && r.record.opponent == "B")
                    || (r.record.team == "B" && r.record.opponent == "A")
            })
            .count();
        assert_eq!(raw, 4);
        assert_eq!(head_to_head(&table, "A", "B", 2025).len(), raw / 2);
    }

    #[test]
    fn test_swapping_teams_mirrors_fixtures() {
        let table = sample_table();
        let ab = head_to_head(&table, "A", "B", 2025);
        let ba = head_to_head(&table, "B", "A", 2025);
        assert_eq!(ab.len(), ba.len());
        for (x, y) in ab.iter().zip(&ba) {
            assert_eq!(&x.mirrored(), y);
        }
    }

    #[test]
    fn test_one_sided_data_is_mirrored() {
        let [home, _away] = fixture(2025, 3, "B", "A", 2, 0);
        let t = crate::snapshot::MatchTable::from_records(
            &[home],
            &crate::features::DeriveOptions::default(),
        )
        .unwrap();
        let fixtures = head_to_head(&t, "A", "B", 2025);
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures[0].team_a, "A");
        assert_eq!((fixtures[0].goals_a, fixtures[0].goals_b), (0, 2));
        assert_eq!(fixtures[0].venue_a, Venue::Away);
        assert_eq!(fixtures[0].result_a, MatchResult::L);
    }

    #[test]
    fn test_season_filter_and_no_meetings() {
        let table = sample_table();
        assert_eq!(head_to_head(&table, "A", "B", 2024).len(), 1);
        assert!(head_to_head(&table, "A", "C", 2024).is_empty());
        assert!(head_to_head(&table, "A", "A", 2025).is_empty());
        let t = table_without_meetings();
        assert!(head_to_head(&t, "A", "D", 2025).is_empty());
    }

    fn table_without_meetings() -> MatchTable {
        table(&[fixture(2025, 1, "A", "B", 1, 0), fixture(2025, 1, "C", "D", 1, 0)])
    }
}
