//! Cost model configuration.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! command-line or environment overrides.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{LensError, Result};

pub const DEFAULT_ENGINEER_COST: f64 = 100_000.0;
pub const DEFAULT_TEAM_SIZE: u32 = 1;
pub const DEFAULT_WORKING_DAYS: u32 = 250;

/// Fully resolved cost model used by the analytics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostConfig {
    /// Annual cost per engineer.
    pub avg_engineer_cost: f64,
    pub team_size: u32,
    pub working_days_per_year: u32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            avg_engineer_cost: DEFAULT_ENGINEER_COST,
            team_size: DEFAULT_TEAM_SIZE,
            working_days_per_year: DEFAULT_WORKING_DAYS,
        }
    }
}

/// A partially specified cost model. Unknown fields in a file are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostSettings {
    pub avg_engineer_cost: Option<f64>,
    pub team_size: Option<u32>,
    pub working_days_per_year: Option<u32>,
}

impl CostSettings {
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading cost configuration from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            LensError::Config(format!("Invalid cost configuration {}: {e}", path.display()))
        })
    }

    /// Layers `overrides` on top of `self`; fields set in `overrides` win.
    #[must_use]
    pub fn overlay(self, overrides: Self) -> Self {
        Self {
            avg_engineer_cost: overrides.avg_engineer_cost.or(self.avg_engineer_cost),
            team_size: overrides.team_size.or(self.team_size),
            working_days_per_year: overrides
                .working_days_per_year
                .or(self.working_days_per_year),
        }
    }

    /// Fills unset fields with defaults. An unset team size falls back to
    /// `observed_team_size` (e.g. distinct commit authors), at least 1.
    pub fn resolve(self, observed_team_size: usize) -> CostConfig {
        let observed = u32::try_from(observed_team_size)
            .unwrap_or(u32::MAX)
            .max(DEFAULT_TEAM_SIZE);

        CostConfig {
            avg_engineer_cost: self.avg_engineer_cost.unwrap_or(DEFAULT_ENGINEER_COST),
            team_size: self.team_size.unwrap_or(observed),
            working_days_per_year: self.working_days_per_year.unwrap_or(DEFAULT_WORKING_DAYS),
        }
    }
}
