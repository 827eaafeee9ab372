//! TOML-based application configuration.
//!
//! Holds presentation guidance only: quick-add amounts and the goal
//! picker range. Store invariants (positive amounts, positive goal) do
//! not live here.
//!
//! Configuration is stored at `~/.config/hydrate/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Intake presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Common glass sizes offered as one-tap adds, in goal units.
    #[serde(default = "default_quick_add")]
    pub quick_add: Vec<f64>,
}

/// Goal picker range. Guidance for goal-selection UIs; the store itself
/// accepts any positive goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPickerConfig {
    #[serde(default = "default_goal_min")]
    pub min: f64,
    #[serde(default = "default_goal_max")]
    pub max: f64,
    #[serde(default = "default_goal_step")]
    pub step: f64,
}

/// Motion simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Render tick rate in Hz. The spring constants are rescaled to this
    /// cadence when it differs from the nominal 60.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/hydrate/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub goal_picker: GoalPickerConfig,
    #[serde(default)]
    pub motion: MotionConfig,
}

fn default_quick_add() -> Vec<f64> {
    vec![8.0, 12.0, 16.0]
}
fn default_goal_min() -> f64 {
    32.0
}
fn default_goal_max() -> f64 {
    128.0
}
fn default_goal_step() -> f64 {
    8.0
}
fn default_tick_hz() -> u32 {
    crate::motion::NOMINAL_TICK_HZ
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            quick_add: default_quick_add(),
        }
    }
}

impl Default for GoalPickerConfig {
    fn default() -> Self {
        Self {
            min: default_goal_min(),
            max: default_goal_max(),
            step: default_goal_step(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed as the existing type, or saving fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Self::set_json_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }

    fn set_json_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }
        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                // Integers stay integers so u32 fields keep round-tripping.
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else {
                    let n = value.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot represent '{value}' as number")))?
                }
            }
            serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }
}
