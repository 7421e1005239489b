//! Configuration loading for rijmhulp
//!
//! Layers, lowest priority first:
//! 1. Built-in defaults
//! 2. Config file (~/.config/rijmhulp/config.toml)
//! 3. Environment variables (RIJMHULP_*)

use crate::error::{Result, RijmError};
use crate::persistence::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rhyme candidates returned per line
    pub max_results: usize,

    /// Tempo used for flow analysis
    pub bpm: u32,

    /// Cached rhyme queries kept before evicting the least recently used; 0 keeps all
    pub cache_capacity: usize,

    /// Where learned slang is stored. Defaults to the user data directory.
    pub slang_path: Option<PathBuf>,

    pub slang_format: SnapshotFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: 6,
            bpm: 90,
            cache_capacity: 512,
            slang_path: None,
            slang_format: SnapshotFormat::Json,
        }
    }
}

impl EngineConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("rijmhulp").join("config.toml"))
    }

    /// The configured slang path, or the per-user default.
    pub fn resolved_slang_path(&self) -> Option<PathBuf> {
        self.slang_path.clone().or_else(|| {
            let file = match self.slang_format {
                SnapshotFormat::Json => "slang.json",
                SnapshotFormat::Bincode => "slang.bin",
            };
            dirs::data_local_dir()
                .or_else(dirs::home_dir)
                .map(|d| d.join("rijmhulp").join(file))
        })
    }
}

pub fn parse_config(contents: &str) -> Result<EngineConfig> {
    toml::from_str(contents).map_err(|e| RijmError::Config(format!("Invalid config: {}", e)))
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();

    let config_path = path.map(PathBuf::from).or_else(EngineConfig::default_path);

    if let Some(ref path) = config_path {
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            let contents = std::fs::read_to_string(path)?;
            config = parse_config(&contents)?;
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
        }
    }

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut EngineConfig, var: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    fn number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
        value
            .trim()
            .parse()
            .map_err(|_| RijmError::Config(format!("{} must be a number, got '{}'", key, value)))
    }

    if let Some(v) = var("RIJMHULP_MAX_RESULTS") {
        config.max_results = number("RIJMHULP_MAX_RESULTS", &v)?;
    }
    if let Some(v) = var("RIJMHULP_BPM") {
        config.bpm = number("RIJMHULP_BPM", &v)?;
    }
    if let Some(v) = var("RIJMHULP_CACHE_CAPACITY") {
        config.cache_capacity = number("RIJMHULP_CACHE_CAPACITY", &v)?;
    }
    if let Some(v) = var("RIJMHULP_SLANG_PATH") {
        config.slang_path = Some(PathBuf::from(v));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("bpm = 120\nslang_format = \"bincode\"\n").unwrap();
        assert_eq!(config.bpm, 120);
        assert_eq!(config.slang_format, SnapshotFormat::Bincode);
        assert_eq!(config.max_results, 6);
        assert_eq!(config.cache_capacity, 512);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        assert!(matches!(parse_config("bpm = \"fast\""), Err(RijmError::Config(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_results = 10\ncache_capacity = 0\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_results, 10);
        assert_eq!(config.cache_capacity, 0);
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_config(Some(dir.path())), Err(RijmError::Io(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            [("RIJMHULP_BPM", "140"), ("RIJMHULP_SLANG_PATH", "/tmp/slang.json")].into();
        let mut config = EngineConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.bpm, 140);
        assert_eq!(config.resolved_slang_path(), Some(PathBuf::from("/tmp/slang.json")));
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = EngineConfig::default();
        let result = apply_env_overrides(&mut config, |k| {
            (k == "RIJMHULP_MAX_RESULTS").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(RijmError::Config(_))));
    }
}
