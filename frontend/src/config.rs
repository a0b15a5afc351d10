//! Config file resolution: an explicit `--config` path, else
//! `<config dir>/vgasim/config.toml` when it exists, else built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use vgasim_core::config::SimConfig;

/// Contents of a config file. Every table and field is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub sim: SimConfig,
    pub keys: KeyConfig,
    pub log_dir: PathBuf,
}

/// SDL key names for the button pin and the control keys.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// One key per button bit, bit 0 first.
    pub buttons: Vec<String>,
    pub restart: String,
    pub capture: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            keys: KeyConfig::default(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            buttons: ["F1", "F2", "F3", "F4"].map(String::from).to_vec(),
            restart: "F12".to_string(),
            capture: "F11".to_string(),
        }
    }
}

impl FileConfig {
    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.sim.validate()?;
        Ok(())
    }
}

/// Default config file location, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vgasim").join("config.toml"))
}

/// Load the effective config file.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<FileConfig> {
    if let Some(path) = explicit {
        return from_file(path);
    }
    match default_path() {
        Some(path) if path.is_file() => from_file(&path),
        _ => Ok(FileConfig::default()),
    }
}

fn from_file(path: &Path) -> anyhow::Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse(text: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(text)
}
