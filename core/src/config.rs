//! Loading and saving analysis settings as TOML.
//!
//! Every field has a default, so a file only needs the settings it changes.

use std::fs;
use std::path::Path;

use kolstat_types::AnalysisConfig;

use crate::error::{Error, Result};

/// Load a config file.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a config to a TOML file.
pub fn save_config(path: &Path, config: &AnalysisConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "rave_steal_window = 2\n\n[report]\ndetails = true\n").unwrap();
        let config = load_config(&path).unwrap();

        assert_eq!(config.rave_steal_window, 2);
        assert!(config.report.details);
        assert_eq!(config.stat_day_min_adventure, 1000);
        assert_eq!(config.item_buffs.len(), 2);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kolstat.toml");
        let mut config = AnalysisConfig::default();
        config.main_stat_bonus = 0.0;
        config.metadata_marker = "[stats];".to_string();
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(load_config(&missing), Err(Error::Io { path, .. }) if path == missing));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "rave_steal_window = \"three\"\n").unwrap();
        assert!(matches!(load_config(&bad), Err(Error::ConfigParse { .. })));

        let unwritable = dir.path().join("no-such-dir").join("out.toml");
        let err = save_config(&unwritable, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io { path, .. } if path == unwritable));
    }
}
