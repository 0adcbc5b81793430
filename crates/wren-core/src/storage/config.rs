//! TOML-based user settings.
//!
//! Stores the privacy and rating-prompt tunables:
//! - Automatic clearing interval (how long in the background before
//!   browsing data is wiped on resume)
//! - Distinct-days-used thresholds for the rating prompts
//!
//! Settings are stored at `~/.config/wren/settings.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::clearing::{ClearingInterval, ClearingIntervalSetting};
use crate::error::{ConfigError, CoreError};
use crate::rating::deciders::{DEFAULT_INITIAL_MIN_DAYS_USED, DEFAULT_SECONDARY_MIN_DAYS_USED};

/// Privacy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivacySettings {
    /// Clearing interval as a settings string. Kept as a string so an
    /// unrecognized value degrades to `never` instead of failing the whole
    /// settings file.
    #[serde(default = "default_interval")]
    pub auto_clear_interval: String,
}

/// Rating-prompt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSettings {
    #[serde(default = "default_initial_days")]
    pub initial_prompt_min_days_used: u32,
    #[serde(default = "default_secondary_days")]
    pub secondary_prompt_min_days_used: u32,
}

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/wren/settings.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub privacy: PrivacySettings,
    #[serde(default)]
    pub rating: RatingSettings,
}

fn default_interval() -> String {
    ClearingInterval::Never.as_setting_str().to_string()
}
fn default_initial_days() -> u32 {
    DEFAULT_INITIAL_MIN_DAYS_USED
}
fn default_secondary_days() -> u32 {
    DEFAULT_SECONDARY_MIN_DAYS_USED
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            auto_clear_interval: default_interval(),
        }
    }
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_prompt_min_days_used: default_initial_days(),
            secondary_prompt_min_days_used: default_secondary_days(),
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("settings.toml"))
    }

    /// Load from disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let settings = toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(settings)
    }

    /// Load from disk, returning defaults on any error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Save to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// The configured clearing interval; unknown values read as `Never`.
    pub fn clearing_interval(&self) -> ClearingInterval {
        ClearingInterval::from_setting_str(&self.privacy.auto_clear_interval)
    }

    /// Read a value by dot-path key, e.g. `privacy.auto_clear_interval`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let value = get_json_value_by_path(&json, key)?;
        Some(match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a value by dot-path key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the settings cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut json = serde_json::to_value(&*self)?;
        set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings = serde_json::from_value(json)?;
        // The secondary prompt fires strictly later than the initial one;
        // reject threshold values that would invert the prompt priority.
        if updated.rating.secondary_prompt_min_days_used
            <= updated.rating.initial_prompt_min_days_used
        {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!(
                    "secondary_prompt_min_days_used ({}) must be greater than \
                     initial_prompt_min_days_used ({})",
                    updated.rating.secondary_prompt_min_days_used,
                    updated.rating.initial_prompt_min_days_used
                ),
            }
            .into());
        }
        *self = updated;
        self.save()?;
        Ok(())
    }
}

impl ClearingIntervalSetting for Settings {
    fn current(&self) -> ClearingInterval {
        self.clearing_interval()
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), CoreError> {
    let mut current = root;
    let parts: Vec<&str> = key.split('.').collect();
    for part in &parts[..parts.len().saturating_sub(1)] {
        current = current
            .get_mut(*part)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("unknown section '{part}'"),
            })?;
    }
    let leaf = parts.last().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        message: "empty key".to_string(),
    })?;
    let slot = current
        .get_mut(*leaf)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("unknown key '{leaf}'"),
        })?;
    *slot = match slot {
        serde_json::Value::Bool(_) => {
            let parsed = value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected a bool, got '{value}'"),
            })?;
            serde_json::Value::Bool(parsed)
        }
        serde_json::Value::Number(_) => {
            let parsed = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("expected a number, got '{value}'"),
            })?;
            serde_json::Value::Number(parsed.into())
        }
        serde_json::Value::String(_) => serde_json::Value::String(value.to_string()),
        _ => {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "key does not hold a settable value".to_string(),
            }
            .into())
        }
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.privacy.auto_clear_interval, "never");
        assert_eq!(parsed.rating.initial_prompt_min_days_used, 2);
        assert_eq!(parsed.rating.secondary_prompt_min_days_used, 7);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let parsed: Settings = toml::from_str("").unwrap();
        assert_eq!(parsed.clearing_interval(), ClearingInterval::Never);
        assert_eq!(parsed.rating.initial_prompt_min_days_used, 2);
    }

    #[test]
    fn unknown_interval_value_reads_as_never() {
        let parsed: Settings = toml::from_str(
            "[privacy]\nauto_clear_interval = \"minutes_90\"\n",
        )
        .unwrap();
        assert_eq!(parsed.clearing_interval(), ClearingInterval::Never);
    }

    #[test]
    fn configured_interval_is_exposed() {
        let parsed: Settings = toml::from_str(
            "[privacy]\nauto_clear_interval = \"minutes_15\"\n",
        )
        .unwrap();
        assert_eq!(parsed.clearing_interval(), ClearingInterval::Minutes15);
        assert_eq!(
            ClearingIntervalSetting::current(&parsed),
            ClearingInterval::Minutes15
        );
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(
            settings.get("privacy.auto_clear_interval").as_deref(),
            Some("never")
        );
        assert_eq!(
            settings.get("rating.initial_prompt_min_days_used").as_deref(),
            Some("2")
        );
        assert!(settings.get("privacy.missing_key").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_nested_string() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        set_json_value_by_path(&mut json, "privacy.auto_clear_interval", "minutes_5").unwrap();
        assert_eq!(
            get_json_value_by_path(&json, "privacy.auto_clear_interval").unwrap(),
            &serde_json::Value::String("minutes_5".to_string())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        set_json_value_by_path(&mut json, "rating.secondary_prompt_min_days_used", "14").unwrap();
        assert_eq!(
            get_json_value_by_path(&json, "rating.secondary_prompt_min_days_used").unwrap(),
            &serde_json::Value::Number(14.into())
        );
    }

    #[test]
    fn set_rejects_secondary_threshold_at_or_below_initial() {
        let mut settings = Settings::default();
        // Default initial threshold is 2; both values would invert the order.
        assert!(settings
            .set("rating.secondary_prompt_min_days_used", "2")
            .is_err());
        assert!(settings
            .set("rating.secondary_prompt_min_days_used", "1")
            .is_err());
        // The rejected value never lands on the settings struct.
        assert_eq!(settings.rating.secondary_prompt_min_days_used, 7);
    }

    #[test]
    fn set_rejects_initial_threshold_at_or_above_secondary() {
        let mut settings = Settings::default();
        // Default secondary threshold is 7.
        assert!(settings
            .set("rating.initial_prompt_min_days_used", "7")
            .is_err());
        assert!(settings
            .set("rating.initial_prompt_min_days_used", "30")
            .is_err());
        assert_eq!(settings.rating.initial_prompt_min_days_used, 2);
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        assert!(set_json_value_by_path(&mut json, "privacy.nonexistent", "x").is_err());
        assert!(set_json_value_by_path(&mut json, "nonexistent.key", "x").is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Settings::default()).unwrap();
        let result =
            set_json_value_by_path(&mut json, "rating.initial_prompt_min_days_used", "soon");
        assert!(result.is_err());
    }
}
