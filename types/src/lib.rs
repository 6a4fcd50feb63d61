//! Shared configuration types for fraglog.
//!
//! These types carry no I/O. Loading and persisting them lives in
//! `fraglog-core` so the CLI and any other front end agree on one schema.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Parse Policy
// ─────────────────────────────────────────────────────────────────────────────

/// What to do with a line that carries an event marker but fails field extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Abort the whole run on the first malformed line. Nothing is written.
    #[default]
    Strict,
    /// Log the malformed line, count it, and keep going.
    Lenient,
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

/// Which record sinks run at the end of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFormats {
    pub json: bool,
    pub parquet: bool,
}

impl Default for OutputFormats {
    fn default() -> Self {
        Self {
            json: true,
            parquet: true,
        }
    }
}

/// Sizes of the cross-match ranking lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingLimits {
    pub top_killers: usize,
    pub top_deaths: usize,
    pub top_suicides: usize,
    pub top_maps: usize,
    pub top_weapons: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            top_killers: 10,
            top_deaths: 10,
            top_suicides: 10,
            top_maps: 5,
            top_weapons: 5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory searched for the input log
    pub data_dir: String,
    /// Log name used when none is given on the command line
    pub default_input: String,
    pub output_dir: String,
    pub parse_policy: ParsePolicy,
    pub formats: OutputFormats,
    pub rankings: RankingLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "dados".to_string(),
            default_input: "Quake 1".to_string(),
            output_dir: "saida".to_string(),
            parse_policy: ParsePolicy::default(),
            formats: OutputFormats::default(),
            rankings: RankingLimits::default(),
        }
    }
}
