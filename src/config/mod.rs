//! Configuration module for product-search
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "PRODUCT_SEARCH_SETTINGS_PATH";

/// Load settings from an explicit path, the environment, a default location,
/// or fall back to defaults. Environment overrides are applied in every case.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        info!("Loading settings from: {}", path.display());
        return from_path(path);
    }

    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            return from_path(&path);
        }
    }

    for path in default_paths() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            return from_path(&path);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn from_path(path: &Path) -> Result<Settings> {
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    Ok(settings)
}

fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("product-search/settings.yml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "product-search-settings-{}.yml",
            std::process::id()
        ));
        std::fs::write(&path, "autocomplete:\n  min_query_length: 4\n").unwrap();

        let settings = load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.autocomplete.min_query_length, 4);
        assert_eq!(settings.autocomplete.debounce_delay_ms, 300);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("product-search-does-not-exist.yml");
        assert!(load(Some(&path)).is_err());
    }
}
