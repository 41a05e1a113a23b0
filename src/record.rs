//! Typed match records, one per team per fixture.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Whether the record is written from the home or the away side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Home" => Some(Venue::Home),
            "Away" => Some(Venue::Away),
            _ => None,
        }
    }

    /// The venue as seen by the opponent.
    pub fn flip(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Home => f.pad("Home"),
            Venue::Away => f.pad("Away"),
        }
    }
}

/// Match outcome from the perspective of the record's team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchResult {
    W,
    D,
    L,
}

impl MatchResult {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "W" => Some(MatchResult::W),
            "D" => Some(MatchResult::D),
            "L" => Some(MatchResult::L),
            _ => None,
        }
    }

    /// League points awarded for this outcome.
    pub fn points(self) -> u8 {
        match self {
            MatchResult::W => 3,
            MatchResult::D => 1,
            MatchResult::L => 0,
        }
    }

    /// The outcome as seen by the opponent.
    pub fn flip(self) -> Self {
        match self {
            MatchResult::W => MatchResult::L,
            MatchResult::D => MatchResult::D,
            MatchResult::L => MatchResult::W,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::W => f.pad("W"),
            MatchResult::D => f.pad("D"),
            MatchResult::L => f.pad("L"),
        }
    }
}

/// A validated input row. Each fixture appears twice, once per participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub team: String,
    pub opponent: String,
    pub season: i32,
    pub round: String,
    pub date: NaiveDate,
    pub venue: Venue,
    pub result: MatchResult,
    pub gf: u32,
    pub ga: u32,
    pub xg: f64,
    pub xga: f64,
    pub poss: f64,
    pub formation: String,
}
