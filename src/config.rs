use crate::storage::{DEFAULT_DATA_DIR, DEFAULT_DATA_FILE, Storage};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_FILE_ENV: &str = "TASKMATE_DATA_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Snapshot file, relative paths resolve against the working directory.
    pub data_file: PathBuf,
    pub greeting: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: Path::new(DEFAULT_DATA_DIR).join(DEFAULT_DATA_FILE),
            greeting: None,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "taskmate", "taskmate")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Reads the user config (defaults when absent), then applies env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::get_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        if let Ok(data_file) = env::var(DATA_FILE_ENV)
            && !data_file.trim().is_empty()
        {
            config.data_file = PathBuf::from(data_file);
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn storage(&self) -> Storage {
        Storage::new(&self.data_file)
    }
}
