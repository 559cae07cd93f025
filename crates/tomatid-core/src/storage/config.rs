//! TOML-based application configuration.
//!
//! Stores the selectable timer modes and the work/break sequence durations.
//! Configuration is stored at `~/.config/tomatid/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::{Segment, Sequence};

/// Timer mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Selectable countdown durations, in minutes, in carousel order.
    #[serde(default = "default_modes_min")]
    pub modes_min: Vec<u64>,
}

/// Work/break sequence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceConfig {
    #[serde(default = "default_work_min")]
    pub work_min: u64,
    #[serde(default = "default_break_min")]
    pub break_min: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tomatid/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub sequence: SequenceConfig,
}

// Default functions
fn default_modes_min() -> Vec<u64> {
    vec![2, 5, 15, 30, 60]
}
fn default_work_min() -> u64 {
    60
}
fn default_break_min() -> u64 {
    15
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            modes_min: default_modes_min(),
        }
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            work_min: default_work_min(),
            break_min: default_break_min(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            sequence: SequenceConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|err| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: err.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// The work/break sequence described by this config.
    pub fn sequence(&self) -> Sequence {
        Sequence::new(vec![
            Segment::work(self.sequence.work_min),
            Segment::rest(self.sequence.break_min),
        ])
        .unwrap_or_else(|_| Sequence::default_work_break())
    }

    /// The selectable countdown durations in seconds, carousel order.
    /// Zero-minute entries are dropped.
    pub fn mode_secs(&self) -> Vec<u64> {
        self.timer
            .modes_min
            .iter()
            .filter(|&&min| min > 0)
            .map(|&min| min.saturating_mul(60))
            .collect()
    }
}
