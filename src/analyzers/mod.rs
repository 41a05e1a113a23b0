//! Aggregations over the derived match table.
//!
//! Every function here is a pure read of a [`MatchTable`](crate::snapshot::MatchTable)
//! plus selection parameters: league tables, team summaries, performance
//! trends, head-to-head records and season-wide insights.

pub mod grade;
pub mod head_to_head;
pub mod insights;
pub mod league_table;
pub mod team_summary;
pub mod trend;
pub mod types;
pub mod utility;

#[cfg(test)]
pub(crate) mod test_support;
