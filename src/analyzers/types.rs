//! Output types produced by the aggregations.
//!
//! All of them are flat and `Serialize`, so they can be written straight to
//! CSV or JSON for charting.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::{MatchResult, Venue};

/// One team's line in a season league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueTableRow {
    pub position: usize,
    pub team: String,
    pub matches: u32,
    pub points: u32,
    pub gf: u32,
    pub ga: u32,
    pub goal_difference: i32,
}

/// Results and goals over a set of matches (all, home only or away only).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SplitStats {
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub gf: u32,
    pub ga: u32,
    pub avg_xg: f64,
    pub avg_xga: f64,
}

impl SplitStats {
    pub fn goal_difference(&self) -> i32 {
        self.gf as i32 - self.ga as i32
    }

    pub fn xg_difference(&self) -> f64 {
        self.avg_xg - self.avg_xga
    }
}

/// A team's season record with its home/away breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub season: i32,
    pub total: SplitStats,
    pub home: SplitStats,
    pub away: SplitStats,
}

/// One point on a team's season progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub match_week: u32,
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub result: MatchResult,
    pub points: u8,
    pub goal_difference: i32,
    pub cumulative_points: u32,
    pub cumulative_goal_difference: i32,
    pub xg: f64,
    pub xga: f64,
    pub rolling_xg_5: f64,
    pub rolling_xga_5: f64,
}

/// Results over the trailing form window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentForm {
    pub results: Vec<MatchResult>,
    pub points: u32,
    /// Points over the window divided by the maximum for a full window.
    pub ratio: f64,
    pub grade: String,
}

/// A single match picked out of a trend (best or worst by goal difference).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchHighlight {
    pub match_week: u32,
    pub date: NaiveDate,
    pub team: String,
    pub opponent: String,
    pub venue: Venue,
    pub gf: u32,
    pub ga: u32,
    pub goal_difference: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTrend {
    pub team: String,
    pub season: i32,
    pub points: Vec<TrendPoint>,
    pub form: RecentForm,
    pub best: MatchHighlight,
    pub worst: MatchHighlight,
}

impl PerformanceTrend {
    pub fn final_points(&self) -> u32 {
        self.points.last().map_or(0, |p| p.cumulative_points)
    }
}

/// A fixture between two teams, always from `team_a`'s side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHeadFixture {
    pub date: NaiveDate,
    pub match_week: u32,
    pub team_a: String,
    pub team_b: String,
    pub venue_a: Venue,
    pub result_a: MatchResult,
    pub goals_a: u32,
    pub goals_b: u32,
    pub xg_a: f64,
    pub xg_b: f64,
}

impl HeadToHeadFixture {
    /// The same fixture seen from `team_b`'s side.
    pub fn mirrored(&self) -> Self {
        Self {
            date: self.date,
            match_week: self.match_week,
            team_a: self.team_b.clone(),
            team_b: self.team_a.clone(),
            venue_a: self.venue_a.flip(),
            result_a: self.result_a.flip(),
            goals_a: self.goals_b,
            goals_b: self.goals_a,
            xg_a: self.xg_b,
            xg_b: self.xg_a,
        }
    }
}

/// A team paired with the value that put it at the top of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMetric<T> {
    pub team: String,
    pub value: T,
}

/// Season-wide headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonInsights {
    pub season: i32,
    pub highest_scoring: TeamMetric<u32>,
    pub best_defense: TeamMetric<u32>,
    pub highest_possession: TeamMetric<f64>,
    pub home_points: u32,
    pub away_points: u32,
    /// Team-match records in the season (two per fixture).
    pub records: u32,
}

impl SeasonInsights {
    /// Home points spread over every team-match record of the season.
    pub fn home_points_per_match(&self) -> f64 {
        per_record(self.home_points, self.records)
    }

    pub fn away_points_per_match(&self) -> f64 {
        per_record(self.away_points, self.records)
    }
}

fn per_record(points: u32, records: u32) -> f64 {
    if records == 0 {
        0.0
    } else {
        points as f64 / records as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub team: String,
    pub points: u32,
    pub avg_xg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossessionPoints {
    pub team: String,
    pub avg_poss: f64,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationPerformance {
    pub formation: String,
    pub matches: u32,
    pub avg_points: f64,
    pub avg_xg: f64,
    pub avg_xga: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentMatch {
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub result: MatchResult,
    pub gf: u32,
    pub ga: u32,
    pub xg: f64,
    pub xga: f64,
    pub poss: f64,
}
