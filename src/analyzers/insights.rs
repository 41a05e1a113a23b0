//! Season-wide insights and the comparison views behind the dashboard.

use std::collections::BTreeMap;

use crate::analyzers::types::{
    FormationPerformance, PossessionPoints, RecentMatch, SeasonInsights, TeamComparison, TeamMetric,
};
use crate::analyzers::utility::{mean, mean_by};
use crate::error::SelectionError;
use crate::features::DerivedMatch;
use crate::record::Venue;
use crate::snapshot::MatchTable;

/// Default number of rows in [`recent_matches`].
pub const RECENT_MATCHES: usize = 10;

#[derive(Default)]
struct TeamSeason {
    points: u32,
    gf: u32,
    ga: u32,
    poss: Vec<f64>,
}

fn per_team(table: &MatchTable, season: i32) -> BTreeMap<&str, TeamSeason> {
    let mut teams: BTreeMap<&str, TeamSeason> = BTreeMap::new();
    for r in table.season_rows(season) {
        let t = teams.entry(r.record.team.as_str()).or_default();
        t.points += r.points as u32;
        t.gf += r.record.gf;
        t.ga += r.record.ga;
        t.poss.push(r.record.poss);
    }
    teams
}

/// Picks the team whose value wins under `better`; the alphabetically first
/// team keeps the spot on ties.
fn leader<T: Copy>(
    teams: &BTreeMap<&str, TeamSeason>,
    value: impl Fn(&TeamSeason) -> T,
    better: impl Fn(T, T) -> bool,
) -> Option<TeamMetric<T>> {
    let mut best: Option<TeamMetric<T>> = None;
    for (team, t) in teams {
        let v = value(t);
        if best.as_ref().is_none_or(|b| better(v, b.value)) {
            best = Some(TeamMetric {
                team: team.to_string(),
                value: v,
            });
        }
    }
    best
}

/// Headline numbers for `season`: top attack, best defence, most possession
/// and the home/away points split.
///
/// # Errors
///
/// Returns [`SelectionError::EmptySeason`] when the season has no matches.
pub fn season_insights(table: &MatchTable, season: i32) -> Result<SeasonInsights, SelectionError> {
    let teams = per_team(table, season);
    let empty = || SelectionError::EmptySeason { season };

    let highest_scoring = leader(&teams, |t| t.gf, |a, b| a > b).ok_or_else(empty)?;
    let best_defense = leader(&teams, |t| t.ga, |a, b| a < b).ok_or_else(empty)?;
    let highest_possession = leader(&teams, |t| mean(&t.poss), |a, b| a > b).ok_or_else(empty)?;

    let mut home_points = 0;
    let mut away_points = 0;
    let mut records = 0;
    for r in table.season_rows(season) {
        records += 1;
        match r.record.venue {
            Venue::Home => home_points += r.points as u32,
            Venue::Away => away_points += r.points as u32,
        }
    }

    Ok(SeasonInsights {
        season,
        highest_scoring,
        best_defense,
        highest_possession,
        home_points,
        away_points,
        records,
    })
}

/// Points and mean xG for each selected team in `season`, most points first.
/// Teams without matches are left out; level teams keep selection order.
pub fn compare_teams(table: &MatchTable, teams: &[String], season: i32) -> Vec<TeamComparison> {
    let mut out: Vec<TeamComparison> = Vec::new();
    for team in teams {
        if out.iter().any(|c| &c.team == team) {
            continue;
        }
        let rows = table.team_rows(team, season);
        if rows.is_empty() {
            continue;
        }
        out.push(TeamComparison {
            team: team.clone(),
            points: rows.iter().map(|r| r.points as u32).sum(),
            avg_xg: mean_by(&rows, |r| r.record.xg),
        });
    }
    out.sort_by(|a, b| b.points.cmp(&a.points));
    out
}

/// Mean possession against total points for every team in `season`, by team
/// name.
pub fn possession_vs_points(table: &MatchTable, season: i32) -> Vec<PossessionPoints> {
    per_team(table, season)
        .into_iter()
        .map(|(team, t)| PossessionPoints {
            team: team.to_string(),
            avg_poss: mean(&t.poss),
            points: t.points,
        })
        .collect()
}

/// How `team` fared with each formation it used in `season`, by formation
/// label. Empty when the team has no matches.
pub fn formation_performance(
    table: &MatchTable,
    team: &str,
    season: i32,
) -> Vec<FormationPerformance> {
    let mut groups: BTreeMap<&str, Vec<&DerivedMatch>> = BTreeMap::new();
    for r in table.team_rows(team, season) {
        groups.entry(r.record.formation.as_str()).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|(formation, rows)| FormationPerformance {
            formation: formation.to_string(),
            matches: rows.len() as u32,
            avg_points: mean_by(&rows, |r| r.points as f64),
            avg_xg: mean_by(&rows, |r| r.record.xg),
            avg_xga: mean_by(&rows, |r| r.record.xga),
        })
        .collect()
}

/// The last `n` matches `team` played in `season`, oldest first.
pub fn recent_matches(table: &MatchTable, team: &str, season: i32, n: usize) -> Vec<RecentMatch> {
    let rows = table.team_rows(team, season);
    rows[rows.len().saturating_sub(n)..]
        .iter()
        .map(|r| RecentMatch {
            date: r.record.date,
            opponent: r.record.opponent.clone(),
            venue: r.record.venue,
            result: r.record.result,
            gf: r.record.gf,
            ga: r.record.ga,
            xg: r.record.xg,
            xga: r.record.xga,
            poss: r.record.poss,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::test_support::{fixture, sample_table, table};

    #[test]
    fn test_season_insights() {
        let i = season_insights(&sample_table(), 2025).unwrap();
        assert_eq!(i.highest_scoring, TeamMetric { team: "A".into(), value: 9 });
        assert_eq!(i.best_defense, TeamMetric { team: "A".into(), value: 5 });
        // everyone averages 50% possession; alphabetical first wins the tie
        assert_eq!(i.highest_possession.team, "A");
        assert!((i.highest_possession.value - 50.0).abs() < 1e-9);
        assert_eq!((i.home_points, i.away_points, i.records), (11, 5, 12));
        assert!((i.home_points_per_match() - 11.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_insights_empty_season() {
        assert_eq!(
            season_insights(&sample_table(), 2030).unwrap_err(),
            SelectionError::EmptySeason { season: 2030 }
        );
    }

    #[test]
    fn test_compare_teams_sorted_by_points() {
        let selected = vec!["C".to_string(), "A".to_string(), "Ghost".to_string(), "B".to_string()];
        let rows = compare_teams(&sample_table(), &selected, 2025);
        let order: Vec<(&str, u32)> = rows.iter().map(|c| (c.team.as_str(), c.points)).collect();
        assert_eq!(order, vec![("A", 7), ("B", 5), ("C", 4)]);
        assert!((rows[0].avg_xg - 2.75).abs() < 1e-9);
    }

    #[test]
    fn test_possession_vs_points() {
        let t = table(&[fixture(2025, 1, "A", "B", 1, 0)]);
        let rows = possession_vs_points(&t, 2025);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team, "A");
        assert!((rows[0].avg_poss - 60.0).abs() < 1e-9);
        assert_eq!(rows[0].points, 3);
        assert!((rows[1].avg_poss - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_formation_performance() {
        let rows = formation_performance(&sample_table(), "A", 2025);
        // home matches use 4-3-3, away matches 4-2-3-1
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].formation, "4-2-3-1");
        assert_eq!(rows[0].matches, 2);
        assert!((rows[0].avg_points - 0.5).abs() < 1e-9);
        assert_eq!(rows[1].formation, "4-3-3");
        assert!((rows[1].avg_points - 3.0).abs() < 1e-9);
        assert!(formation_performance(&sample_table(), "Nobody", 2025).is_empty());
    }

    #[test]
    fn test_recent_matches_tail() {
        let rows = recent_matches(&sample_table(), "A", 2025, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].opponent, "B");
        assert_eq!(rows[1].opponent, "C");
        assert_eq!((rows[1].gf, rows[1].ga), (4, 0));
        assert_eq!(recent_matches(&sample_table(), "A", 2025, RECENT_MATCHES).len(), 4);
    }
}
