//! Run settings: defaults, an optional JSON file, then environment variables.
//!
//! A settings file is a plain JSON object; every key is optional:
//! ```json
//! {
//!   "data_path": "data/final_matches.csv",
//!   "team": "Liverpool",
//!   "rival": "Everton",
//!   "rolling_scope": "team-season",
//!   "round_policy": "skip"
//! }
//! ```

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::features::{DeriveOptions, RollingScope, RoundPolicy};

pub const DEFAULT_DATA_PATH: &str = "final_matches.csv";
pub const DEFAULT_TEAM: &str = "Arsenal";
pub const DEFAULT_RIVAL: &str = "Manchester City";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub team: String,
    pub rival: String,
    pub derive: DeriveOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            team: DEFAULT_TEAM.to_string(),
            rival: DEFAULT_RIVAL.to_string(),
            derive: DeriveOptions::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    data_path: Option<PathBuf>,
    team: Option<String>,
    rival: Option<String>,
    rolling_scope: Option<String>,
    round_policy: Option<String>,
}

impl Settings {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_vars(|key| std::env::var(key).ok())
    }

    /// Overrides fields from a JSON settings file.
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let file: SettingsFile = serde_json::from_str(&content)
            .with_context(|| format!("parse settings file {}", path.display()))?;

        if let Some(p) = file.data_path {
            self.data_path = p;
        }
        if let Some(t) = file.team {
            self.team = t;
        }
        if let Some(r) = file.rival {
            self.rival = r;
        }
        if let Some(s) = file.rolling_scope {
            self.derive.rolling_scope = s.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(p) = file.round_policy {
            self.derive.round_policy = p.parse().map_err(|e: String| anyhow!(e))?;
        }
        Ok(self)
    }

    /// Overrides fields from `PL_*` variables looked up through `var`.
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(p) = var("PL_DATA_PATH") {
            self.data_path = PathBuf::from(p);
        }
        if let Some(t) = var("PL_DEFAULT_TEAM") {
            self.team = t;
        }
        if let Some(r) = var("PL_DEFAULT_RIVAL") {
            self.rival = r;
        }
        if let Some(s) = var("PL_ROLLING_SCOPE") {
            self.derive.rolling_scope = s
                .parse::<RollingScope>()
                .map_err(|e| anyhow!("PL_ROLLING_SCOPE: {e}"))?;
        }
        if let Some(p) = var("PL_ROUND_POLICY") {
            self.derive.round_policy = p
                .parse::<RoundPolicy>()
                .map_err(|e| anyhow!("PL_ROUND_POLICY: {e}"))?;
        }
        Ok(self)
    }
}
