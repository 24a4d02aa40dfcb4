use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};

use crate::error::ConfigError;
use crate::Floor;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BuildingConfig {
    pub num_units: usize,
    pub total_floors: Floor,
    pub unit_capacity: u32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            num_units: 3,
            total_floors: 10,
            unit_capacity: 8,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SchedulerConfig {
    pub tick_ms: u64,
}

impl SchedulerConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig { tick_ms: 1000 }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Reads `config.json`, falling back to `_config.json` and then to the
    /// built-in defaults, and applies `--flag value` overrides from `args`
    /// (program name excluded).
    pub fn get(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = match Config::from_file(CONFIG_FILE_PATH) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => {
                info!("No configuration file provided, using default settings...");
                match Config::from_file(FALLBACK_CONFIG_FILE_PATH) {
                    Ok(config) => config,
                    Err(ConfigError::Io(_)) => {
                        warn!("No fallback configuration found, using built-in defaults");
                        Config::default()
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&config_contents)?)
    }

    pub fn apply_args(&mut self, args: &[String]) {
        for arg_pair in args.chunks(2) {
            let (flag, value) = match arg_pair {
                [flag, value] => (flag.as_str(), value.as_str()),
                [flag] => {
                    warn!("argument {} has no value, skipping...", flag);
                    continue;
                }
                _ => continue,
            };
            match flag {
                "--units" => match value.parse::<usize>() {
                    Ok(num) => self.building.num_units = num,
                    Err(_) => warn!("units {} is not a number, skipping...", value),
                },
                "--floors" => match value.parse::<Floor>() {
                    Ok(num) => self.building.total_floors = num,
                    Err(_) => warn!("floors {} is not a number, skipping...", value),
                },
                "--capacity" => match value.parse::<u32>() {
                    Ok(num) => self.building.unit_capacity = num,
                    Err(_) => warn!("capacity {} is not a number, skipping...", value),
                },
                "--tick-ms" => match value.parse::<u64>() {
                    Ok(num) => self.scheduler.tick_ms = num,
                    Err(_) => warn!("tick period {} is not a number, skipping...", value),
                },
                _ => warn!("illegal argument {}, skipping...", flag),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.building.num_units == 0 {
            return Err(ConfigError::Invalid(String::from("at least one unit is required")));
        }
        if self.building.total_floors == 0 {
            return Err(ConfigError::Invalid(String::from("at least one floor is required")));
        }
        if self.scheduler.tick_ms == 0 {
            return Err(ConfigError::Invalid(String::from("tick period must be non-zero")));
        }
        Ok(())
    }
}
