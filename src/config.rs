//! Settings persistence.
//!
//! Settings live in one JSON file under the user config directory. A
//! missing file yields defaults; a malformed file is an error so a bad
//! hand-edit does not silently wipe configuration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::PosSettings;

/// Errors from loading or saving the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Resolve the settings file path (XDG with home fallback).
pub fn settings_path() -> PathBuf {
    let xdg_config = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_default();
        format!("{home}/.config")
    });

    let dir = PathBuf::from(xdg_config).join("ordercast");
    fs::create_dir_all(&dir).ok();
    dir.join("settings.json")
}

/// Load settings from disk. A missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<PosSettings, ConfigError> {
    if !path.exists() {
        return Ok(PosSettings::default());
    }
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Persist settings to disk, pretty-printed so the file stays
/// hand-editable.
pub fn save_settings(path: &Path, settings: &PosSettings) -> Result<(), ConfigError> {
    fs::write(path, serde_json::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ordercast-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = scratch_path("does-not-exist.json");
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.business_name, PosSettings::default().business_name);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let path = scratch_path("round-trip.json");
        let settings = PosSettings {
            business_name: "Crab Shack".into(),
            default_prep_time_minutes: Some(12),
            kds_show_source: false,
        };

        save_settings(&path, &settings).unwrap();
        let loaded = load_settings(&path).unwrap();

        assert_eq!(loaded.business_name, "Crab Shack");
        assert_eq!(loaded.default_prep_time_minutes, Some(12));
        assert!(!loaded.kds_show_source);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = scratch_path("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_settings(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_settings_wire_names_are_camel_case() {
        let json = serde_json::to_value(PosSettings::default()).unwrap();
        assert!(json.get("businessName").is_some());
        assert!(json.get("kdsShowSource").is_some());
    }
}
