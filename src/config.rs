//! Calculator defaults
//!
//! Values used when a request leaves an optional parameter out. Loaded from a
//! JSON file where every key is optional.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deposits::DEFAULT_DEPOSIT_COMPOUNDING;
use crate::goal::{DEFAULT_GOAL_COMPOUNDING, DEFAULT_GOAL_RATE_PERCENT};

/// Compounding assumed by the interest calculator (monthly)
pub const DEFAULT_INTEREST_COMPOUNDING: f64 = 12.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open defaults file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid defaults file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Defaults for optional calculator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorDefaults {
    /// Compounding periods per year for recurring and fixed deposits
    #[serde(default = "default_deposit_compounding")]
    pub deposit_compounding_per_year: f64,

    /// Compounding periods per year for compound interest
    #[serde(default = "default_interest_compounding")]
    pub interest_compounding_per_year: f64,

    /// Expected annual return for the goal planner
    #[serde(default = "default_goal_rate")]
    pub goal_annual_rate_percent: f64,

    /// Compounding periods per year for the goal planner
    #[serde(default = "default_goal_compounding")]
    pub goal_compounding_per_year: f64,
}

fn default_deposit_compounding() -> f64 { DEFAULT_DEPOSIT_COMPOUNDING }
fn default_interest_compounding() -> f64 { DEFAULT_INTEREST_COMPOUNDING }
fn default_goal_rate() -> f64 { DEFAULT_GOAL_RATE_PERCENT }
fn default_goal_compounding() -> f64 { DEFAULT_GOAL_COMPOUNDING }

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            deposit_compounding_per_year: DEFAULT_DEPOSIT_COMPOUNDING,
            interest_compounding_per_year: DEFAULT_INTEREST_COMPOUNDING,
            goal_annual_rate_percent: DEFAULT_GOAL_RATE_PERCENT,
            goal_compounding_per_year: DEFAULT_GOAL_COMPOUNDING,
        }
    }
}

impl CalculatorDefaults {
    /// Load defaults from a JSON file; missing keys keep their default values
    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse defaults from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}
