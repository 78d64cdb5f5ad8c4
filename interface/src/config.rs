// Runtime settings, read from an optional TOML file:
//   <config dir>/logic_designer/config.toml
// Any field left out keeps its default.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where SAVE writes its timestamped PNGs.
    pub export_dir: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    /// Used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("saved_diagrams"),
            window_width: 1024.0,
            window_height: 768.0,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("logic_designer").join("config.toml"))
    }

    pub fn load() -> Result<Config> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_override() {
        let c = Config::parse("export_dir = \"/tmp/diagrams\"\nwindow_width = 1280.0\n").unwrap();
        assert_eq!(c.export_dir, PathBuf::from("/tmp/diagrams"));
        assert_eq!(c.window_width, 1280.0);
        assert_eq!(c.window_height, 768.0);
        assert_eq!(c.log_filter, "info");
    }

    #[test]
    fn bad_value_is_an_error() {
        assert!(Config::parse("window_height = \"tall\"").is_err());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_filter = \"debug\"").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().log_filter, "debug");
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
