//! Wait oracle configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::heuristic::HeuristicConfig;
use super::weather::WeatherOverride;

/// Forecast settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OracleConfig {
    /// Linear model JSON; heuristic waits are used when unset or unreadable
    pub model_path: Option<PathBuf>,

    /// Weather fed to the model when the caller gives no override
    pub default_weather: WeatherOverride,

    pub heuristic: HeuristicConfig,

    /// Extra crowd-risk dates on top of weekends
    pub holidays: Vec<NaiveDate>,
}
