use crate::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_LISTEN_ADDRESS, DEFAULT_LISTEN_PORT, DEFAULT_READ_BUFFER_SIZE,
};
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub start_dir: Option<PathBuf>, // Defaults to the working directory at startup
    pub root_dir: Option<PathBuf>,  // No confinement when unset
    pub read_buffer_size: Option<usize>, // Optional to allow default value
    pub trim_line_terminator: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from(DEFAULT_LISTEN_ADDRESS),
            listen_port: DEFAULT_LISTEN_PORT,
            start_dir: None,
            root_dir: None,
            read_buffer_size: Some(DEFAULT_READ_BUFFER_SIZE),
            trim_line_terminator: false,
        }
    }
}

impl ServerConfig {
    pub fn read_buffer_size(&self) -> usize {
        match self.read_buffer_size {
            Some(size) if size > 0 => size,
            _ => DEFAULT_READ_BUFFER_SIZE,
        }
    }

    pub fn listen_endpoint(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        Ok(config)
    }

    /// Loads `path` if given. Otherwise the default location is used when
    /// present, and built-in defaults when it is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::load_from_file(default_path)
                } else {
                    info!("No configuration file found, using defaults.");
                    Ok(Self::default())
                }
            }
        }
    }
}
