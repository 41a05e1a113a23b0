use chrono::NaiveDate;

use crate::features::DeriveOptions;
use crate::record::{MatchRecord, MatchResult, Venue};
use crate::snapshot::MatchTable;

/// Both team records for a fixture; `home` hosts `away` in `week`.
pub fn fixture(season: i32, week: u32, home: &str, away: &str, hg: u32, ag: u32) -> [MatchRecord; 2] {
    let date = NaiveDate::from_ymd_opt(season - 1, 8, 10).unwrap() + chrono::Days::new(7 * week as u64);
    let side = |team: &str, opponent: &str, venue: Venue, gf: u32, ga: u32| MatchRecord {
        team: team.to_string(),
        opponent: opponent.to_string(),
        season,
        round: format!("Matchweek {week}"),
        date,
        venue,
        result: match gf.cmp(&ga) {
            std::cmp::Ordering::Greater => MatchResult::W,
            std::cmp::Ordering::Equal => MatchResult::D,
            std::cmp::Ordering::Less => MatchResult::L,
        },
        gf,
        ga,
        xg: gf as f64 + 0.5,
        xga: ga as f64 + 0.5,
        poss: if venue == Venue::Home { 60.0 } else { 40.0 },
        formation: if venue == Venue::Home { "4-3-3" } else { "4-2-3-1" }.to_string(),
    };
    [
        side(home, away, Venue::Home, hg, ag),
        side(away, home, Venue::Away, ag, hg),
    ]
}

pub fn table(fixtures: &[[MatchRecord; 2]]) -> MatchTable {
    let records: Vec<MatchRecord> = fixtures.iter().flat_map(|f| f.iter().cloned()).collect();
    MatchTable::from_records(&records, &DeriveOptions::default()).unwrap()
}

/// A small 2025 season: A, B and C meet home and away; 2024 has one fixture.
pub fn sample_table() -> MatchTable {
    table(&[
        fixture(2024, 1, "A", "B", 0, 1),
        fixture(2025, 1, "A", "B", 3, 1),
        fixture(2025, 2, "C", "A", 2, 0),
        fixture(2025, 3, "B", "C", 1, 1),
        fixture(2025, 4, "B", "A", 2, 2),
        fixture(2025, 5, "A", "C", 4, 0),
        fixture(2025, 6, "C", "B", 0, 3),
    ])
}
