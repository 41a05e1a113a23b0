//! Plain-text report sections written to stdout by the CLI.
//!
//! Layout is presentational only; nothing downstream parses it.

use std::fmt::Write;

use crate::analyzers::head_to_head::head_to_head;
use crate::analyzers::insights::{
    compare_teams, formation_performance, recent_matches, season_insights,
};
use crate::analyzers::league_table::league_table;
use crate::analyzers::team_summary::team_summary;
use crate::analyzers::trend::{FORM_MAX_POINTS, performance_trend};
use crate::analyzers::types::{
    FormationPerformance, HeadToHeadFixture, LeagueTableRow, PerformanceTrend, RecentMatch,
    SeasonInsights, SplitStats, TeamComparison, TeamSummary,
};
use crate::error::SelectionError;
use crate::snapshot::MatchTable;

const BANNER_WIDTH: usize = 50;

/// Rows shown at each end of the season summary table.
pub const TABLE_EDGE: usize = 5;

/// Selections for the full text report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub season: i32,
    pub team: String,
    pub rival: String,
}

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\n{title}\n{rule}\n")
}

pub fn render_not_found(err: &SelectionError) -> String {
    match err {
        SelectionError::EmptySeason { season } => format!("No matches found for season {season}\n"),
        SelectionError::TeamNotFound { team, season } => {
            format!("No data found for {team} in season {season}\n")
        }
    }
}

pub fn render_overview(table: &MatchTable) -> String {
    let mut out = String::new();
    let seasons: Vec<String> = table.seasons().iter().map(i32::to_string).collect();
    let teams: std::collections::BTreeSet<&str> =
        table.rows().iter().map(|r| r.record.team.as_str()).collect();
    let _ = writeln!(out, "Rows: {}", table.rows().len());
    let _ = writeln!(out, "Seasons: {}", seasons.join(", "));
    let _ = writeln!(out, "Teams: {} teams", teams.len());
    if !table.skipped().is_empty() {
        let _ = writeln!(out, "Skipped rows without match week: {}", table.skipped().len());
    }
    out
}

pub fn render_insights(i: &SeasonInsights) -> String {
    let mut out = banner("GENERAL INSIGHTS");
    let _ = writeln!(out, "Season {} Insights:", i.season);
    let _ = writeln!(
        out,
        "Highest scoring team: {} ({} goals)",
        i.highest_scoring.team, i.highest_scoring.value
    );
    let _ = writeln!(
        out,
        "Best defensive team: {} ({} goals conceded)",
        i.best_defense.team, i.best_defense.value
    );
    let _ = writeln!(
        out,
        "Highest average possession: {} ({:.1}%)",
        i.highest_possession.team, i.highest_possession.value
    );
    let _ = writeln!(out, "\nHome advantage:");
    let _ = writeln!(
        out,
        "Home points: {} ({:.1} per match)",
        i.home_points,
        i.home_points_per_match()
    );
    let _ = writeln!(
        out,
        "Away points: {} ({:.1} per match)",
        i.away_points,
        i.away_points_per_match()
    );
    out
}

fn table_header(out: &mut String) {
    let _ = writeln!(
        out,
        "{:>3}  {:<24} {:>3} {:>4} {:>4} {:>4} {:>5}",
        "Pos", "Team", "MP", "Pts", "GF", "GA", "GD"
    );
}

fn table_line(out: &mut String, r: &LeagueTableRow) {
    let _ = writeln!(
        out,
        "{:>3}  {:<24} {:>3} {:>4} {:>4} {:>4} {:>+5}",
        r.position, r.team, r.matches, r.points, r.gf, r.ga, r.goal_difference
    );
}

/// The full table, one line per team.
pub fn render_league_table(season: i32, rows: &[LeagueTableRow]) -> String {
    let mut out = banner(&format!("LEAGUE TABLE - SEASON {season}"));
    table_header(&mut out);
    for r in rows {
        table_line(&mut out, r);
    }
    out
}

/// Top and bottom [`TABLE_EDGE`] rows of the table.
pub fn render_season_summary(season: i32, rows: &[LeagueTableRow]) -> String {
    let mut out = banner(&format!("SEASON {season} SUMMARY"));

    let _ = writeln!(out, "\nTOP {TABLE_EDGE} TEAMS:");
    table_header(&mut out);
    for r in rows.iter().take(TABLE_EDGE) {
        table_line(&mut out, r);
    }

    let _ = writeln!(out, "\nBOTTOM {TABLE_EDGE} TEAMS:");
    table_header(&mut out);
    for r in &rows[rows.len().saturating_sub(TABLE_EDGE)..] {
        table_line(&mut out, r);
    }
    out
}

fn split_lines(out: &mut String, label: &str, s: &SplitStats) {
    let _ = writeln!(out, "\n{label} PERFORMANCE:");
    let _ = writeln!(out, "Matches: {}", s.matches);
    let _ = writeln!(out, "Points: {}", s.points);
    let _ = writeln!(out, "Goals: {} for, {} against", s.gf, s.ga);
}

pub fn render_team_summary(s: &TeamSummary) -> String {
    let mut out = banner(&format!(
        "{} ANALYSIS - SEASON {}",
        s.team.to_uppercase(),
        s.season
    ));
    let t = &s.total;
    let _ = writeln!(out, "Matches played: {}", t.matches);
    let _ = writeln!(out, "Wins: {}, Draws: {}, Losses: {}", t.wins, t.draws, t.losses);
    let _ = writeln!(out, "Points: {}", t.points);
    let _ = writeln!(out, "Goals: {} for, {} against", t.gf, t.ga);
    let _ = writeln!(out, "Goal difference: {}", t.goal_difference());

    split_lines(&mut out, "HOME", &s.home);
    split_lines(&mut out, "AWAY", &s.away);

    let _ = writeln!(out, "\nEXPECTED GOALS:");
    let _ = writeln!(out, "Average xG: {:.2}", t.avg_xg);
    let _ = writeln!(out, "Average xGA: {:.2}", t.avg_xga);
    let _ = writeln!(out, "xG difference: {:.2}", t.xg_difference());
    out
}

pub fn render_trend(t: &PerformanceTrend) -> String {
    let mut out = banner(&format!(
        "{} PERFORMANCE TRENDS - SEASON {}",
        t.team.to_uppercase(),
        t.season
    ));

    let _ = writeln!(out, "\nPOINTS PROGRESSION:");
    for p in &t.points {
        let _ = writeln!(
            out,
            "Week {}: {} points (GD {:+}, rolling xG {:.2} / xGA {:.2})",
            p.match_week,
            p.cumulative_points,
            p.cumulative_goal_difference,
            p.rolling_xg_5,
            p.rolling_xga_5
        );
    }

    let results: Vec<String> = t.form.results.iter().map(ToString::to_string).collect();
    let _ = writeln!(out, "\nRECENT FORM (Last {} matches):", t.form.results.len());
    let _ = writeln!(out, "Results: {}", results.join(" - "));
    let _ = writeln!(
        out,
        "Points: {}/{} (grade {})",
        t.form.points, FORM_MAX_POINTS, t.form.grade
    );

    for (label, m) in [("BEST", &t.best), ("WORST", &t.worst)] {
        let _ = writeln!(out, "\n{label} PERFORMANCE:");
        let _ = writeln!(
            out,
            "Week {}: {} {}-{} {} ({})",
            m.match_week, m.team, m.gf, m.ga, m.opponent, m.venue
        );
    }
    out
}

pub fn render_head_to_head(
    team_a: &str,
    team_b: &str,
    season: i32,
    fixtures: &[HeadToHeadFixture],
) -> String {
    let mut out = banner(&format!(
        "HEAD-TO-HEAD: {} vs {} - SEASON {}",
        team_a.to_uppercase(),
        team_b.to_uppercase(),
        season
    ));
    if fixtures.is_empty() {
        let _ = writeln!(
            out,
            "No matches found between {team_a} and {team_b} in season {season}"
        );
        return out;
    }

    let _ = writeln!(out, "Matches found: {}", fixtures.len());
    for f in fixtures {
        let _ = writeln!(
            out,
            "{}: {} {}-{} {} ({} for {})",
            f.date.format("%Y-%m-%d"),
            f.team_a,
            f.goals_a,
            f.goals_b,
            f.team_b,
            f.venue_a,
            f.team_a
        );
    }
    out
}

pub fn render_comparison(season: i32, rows: &[TeamComparison]) -> String {
    let mut out = banner(&format!("TEAM COMPARISON - SEASON {season}"));
    if rows.is_empty() {
        let _ = writeln!(out, "None of the selected teams played in season {season}");
    }
    for r in rows {
        let _ = writeln!(out, "{:<24} {:>4} pts  avg xG {:.2}", r.team, r.points, r.avg_xg);
    }
    out
}

pub fn render_formations(team: &str, season: i32, rows: &[FormationPerformance]) -> String {
    let mut out = banner(&format!(
        "{} FORMATIONS - SEASON {}",
        team.to_uppercase(),
        season
    ));
    if rows.is_empty() {
        let _ = writeln!(out, "No data found for {team} in season {season}");
    }
    for r in rows {
        let _ = writeln!(
            out,
            "{:<12} {:>3} matches  {:.2} pts/match  xG {:.2}  xGA {:.2}",
            r.formation, r.matches, r.avg_points, r.avg_xg, r.avg_xga
        );
    }
    out
}

pub fn render_recent(team: &str, season: i32, rows: &[RecentMatch]) -> String {
    let mut out = banner(&format!(
        "RECENT MATCHES - {} - SEASON {}",
        team.to_uppercase(),
        season
    ));
    if rows.is_empty() {
        let _ = writeln!(out, "No data found for {team} in season {season}");
    }
    for r in rows {
        let _ = writeln!(
            out,
            "{}  {:<24} {:<4} {} {}-{}  xG {:.2}  xGA {:.2}  poss {:.1}",
            r.date.format("%Y-%m-%d"),
            r.opponent,
            r.venue,
            r.result,
            r.gf,
            r.ga,
            r.xg,
            r.xga,
            r.poss
        );
    }
    out
}

/// Runs every section of the console report in order. Selections that match
/// no rows print a notice in place of their section.
#[tracing::instrument(skip(table))]
pub fn full_report(table: &MatchTable, request: &ReportRequest) -> String {
    let mut out = String::from("PREMIER LEAGUE DATA ANALYSIS\n");
    out.push_str(&"=".repeat(BANNER_WIDTH));
    out.push('\n');
    out.push_str(&render_overview(table));

    let latest = table.latest_season().unwrap_or(request.season);
    section(&mut out, season_insights(table, latest), render_insights);

    section(&mut out, league_table(table, request.season), |rows| {
        render_season_summary(request.season, rows)
    });
    section(
        &mut out,
        team_summary(table, &request.team, request.season),
        render_team_summary,
    );
    section(
        &mut out,
        performance_trend(table, &request.team, request.season),
        render_trend,
    );

    let fixtures = head_to_head(table, &request.team, &request.rival, request.season);
    out.push_str(&render_head_to_head(
        &request.team,
        &request.rival,
        request.season,
        &fixtures,
    ));

    out.push_str(&banner("ANALYSIS COMPLETE!"));
    out
}

fn section<T>(
    out: &mut String,
    result: Result<T, SelectionError>,
    render: impl FnOnce(&T) -> String,
) {
    match result {
        Ok(value) => out.push_str(&render(&value)),
        Err(e) => {
            tracing::warn!(error = %e, "Report section skipped");
            out.push('\n');
            out.push_str(&render_not_found(&e));
        }
    }
}

/// Dashboard-style extras for one team: comparison with the rival, formations
/// and the latest matches.
pub fn team_extras(table: &MatchTable, request: &ReportRequest, recent: usize) -> String {
    let mut out = String::new();
    let selected = vec![request.team.clone(), request.rival.clone()];
    out.push_str(&render_comparison(
        request.season,
        &compare_teams(table, &selected, request.season),
    ));
    out.push_str(&render_formations(
        &request.team,
        request.season,
        &formation_performance(table, &request.team, request.season),
    ));
    out.push_str(&render_recent(
        &request.team,
        request.season,
        &recent_matches(table, &request.team, request.season, recent),
    ));
    out
}
