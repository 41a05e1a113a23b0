use crate::analyzers::grade::form_grade;
use crate::analyzers::types::{MatchHighlight, PerformanceTrend, RecentForm, TrendPoint};
use crate::error::SelectionError;
use crate::features::DerivedMatch;
use crate::snapshot::MatchTable;

/// Matches in the recent-form window.
pub const FORM_WINDOW: usize = 5;

/// Points available over a full form window.
pub const FORM_MAX_POINTS: u32 = FORM_WINDOW as u32 * 3;

/// Builds `team`'s season progression: cumulative points and goal difference
/// per match week, recent form and the best and worst results.
///
/// Best and worst pick the first match in chronological order when several
/// share the same goal difference.
///
/// # Errors
///
/// Returns [`SelectionError::TeamNotFound`] when the team has no matches in
/// `season`.
pub fn performance_trend(
    table: &MatchTable,
    team: &str,
    season: i32,
) -> Result<PerformanceTrend, SelectionError> {
    let rows = table.team_rows(team, season);
    let Some(&first) = rows.first() else {
        return Err(SelectionError::TeamNotFound {
            team: team.to_string(),
            season,
        });
    };

    let mut points = Vec::with_capacity(rows.len());
    let mut cumulative_points = 0u32;
    let mut cumulative_gd = 0i32;
    let mut best = first;
    let mut worst = first;

    for &r in &rows {
        cumulative_points += r.points as u32;
        cumulative_gd += r.goal_difference;
        if r.goal_difference > best.goal_difference {
            best = r;
        }
        if r.goal_difference < worst.goal_difference {
            worst = r;
        }

        points.push(TrendPoint {
            match_week: r.match_week,
            date: r.record.date,
            opponent: r.record.opponent.clone(),
            venue: r.record.venue,
            result: r.record.result,
            points: r.points,
            goal_difference: r.goal_difference,
            cumulative_points,
            cumulative_goal_difference: cumulative_gd,
            xg: r.record.xg,
            xga: r.record.xga,
            rolling_xg_5: r.rolling_xg_5,
            rolling_xga_5: r.rolling_xga_5,
        });
    }

    Ok(PerformanceTrend {
        team: team.to_string(),
        season,
        points,
        form: recent_form(&rows),
        best: highlight(best),
        worst: highlight(worst),
    })
}

/// Form over the last [`FORM_WINDOW`] matches. The ratio is always taken
/// against [`FORM_MAX_POINTS`], even when fewer matches have been played.
pub fn recent_form(rows: &[&DerivedMatch]) -> RecentForm {
    let window = &rows[rows.len().saturating_sub(FORM_WINDOW)..];
    let points: u32 = window.iter().map(|r| r.points as u32).sum();
    let ratio = points as f64 / FORM_MAX_POINTS as f64;

    RecentForm {
        results: window.iter().map(|r| r.record.result).collect(),
        points,
        ratio,
        grade: form_grade(ratio),
    }
}

fn highlight(r: &DerivedMatch) -> MatchHighlight {
    MatchHighlight {
        match_week: r.match_week,
        date: r.record.date,
        team: r.record.team.clone(),
        opponent: r.record.opponent.clone(),
        venue: r.record.venue,
        gf: r.record.gf,
        ga: r.record.ga,
        goal_difference: r.goal_difference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::team_summary::team_summary;
    use crate::analyzers::test_support::{fixture, sample_table, table};
    use crate::record::MatchResult;

    #[test]
    fn test_cumulative_series() {
        let trend = performance_trend(&sample_table(), "A", 2025).unwrap();
        let series: Vec<(u32, u32, i32)> = trend
            .points
            .iter()
            .map(|p| (p.match_week, p.cumulative_points, p.cumulative_goal_difference))
            .collect();
        assert_eq!(series, vec![(1, 3, 2), (2, 3, 0), (4, 4, 0), (5, 7, 4)]);
    }

    #[test]
    fn test_final_points_match_summary() {
        let table = sample_table();
        for team in ["A", "B", "C"] {
            let trend = performance_trend(&table, team, 2025).unwrap();
            let summary = team_summary(&table, team, 2025).unwrap();
            assert_eq!(trend.final_points(), summary.total.points);
        }
    }

    #[test]
    fn test_best_and_worst() {
        let trend = performance_trend(&sample_table(), "A", 2025).unwrap();
        assert_eq!(trend.best.match_week, 5);
        assert_eq!((trend.best.gf, trend.best.ga), (4, 0));
        assert_eq!(trend.best.opponent, "C");
        assert_eq!(trend.worst.match_week, 2);
        assert_eq!(trend.worst.goal_difference, -2);
    }

    #[test]
    fn test_best_and_worst_ties_pick_first_occurrence() {
        let t = table(&[
            fixture(2025, 1, "A", "B", 2, 0),
            fixture(2025, 2, "A", "C", 1, 1),
            fixture(2025, 3, "A", "D", 3, 1),
            fixture(2025, 4, "A", "E", 0, 0),
        ]);
        let trend = performance_trend(&t, "A", 2025).unwrap();
        assert_eq!(trend.best.match_week, 1);
        assert_eq!(trend.worst.match_week, 2);
    }

    #[test]
    fn test_recent_form_uses_last_five_of_fifteen() {
        let t = table(&[
            fixture(2025, 1, "A", "B", 0, 1),
            fixture(2025, 2, "A", "C", 1, 0),
            fixture(2025, 3, "A", "D", 1, 0),
            fixture(2025, 4, "A", "E", 1, 1),
            fixture(2025, 5, "A", "F", 0, 2),
            fixture(2025, 6, "A", "G", 2, 0),
        ]);
        let trend = performance_trend(&t, "A", 2025).unwrap();
        assert_eq!(
            trend.form.results,
            vec![MatchResult::W, MatchResult::W, MatchResult::D, MatchResult::L, MatchResult::W]
        );
        assert_eq!(trend.form.points, 10);
        assert!((trend.form.ratio - 10.0 / 15.0).abs() < 1e-9);
        assert_eq!(trend.form.grade, "B");
    }

    #[test]
    fn test_short_form_window_is_measured_against_fifteen() {
        let trend = performance_trend(&sample_table(), "A", 2025).unwrap();
        assert_eq!(trend.form.results.len(), 4);
        assert_eq!(trend.form.points, 7);
        assert!((trend.form.ratio - 7.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_team_is_not_found() {
        assert!(matches!(
            performance_trend(&sample_table(), "Nobody", 2025),
            Err(SelectionError::TeamNotFound { .. })
        ));
    }
}
