//! Server configuration.

use anyhow::Result;
use poelog_core::ChatMarkers;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory the game writes its logs into.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file name inside `log_dir`.
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Whisper direction markers as localized by the game client.
    #[serde(default = "default_incoming_marker")]
    pub incoming_marker: String,
    #[serde(default = "default_outgoing_marker")]
    pub outgoing_marker: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8130
}

fn default_log_dir() -> PathBuf {
    // The game's stock install location; override in config for anything else.
    match std::env::var_os("ProgramFiles(x86)") {
        Some(program_files) => PathBuf::from(program_files)
            .join("Grinding Gear Games")
            .join("Path of Exile")
            .join("logs"),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Path of Exile")
            .join("logs"),
    }
}

fn default_log_file() -> String {
    "Client.txt".to_string()
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_incoming_marker() -> String {
    "From ".to_string()
}

fn default_outgoing_marker() -> String {
    "To ".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            poll_interval_ms: default_poll_interval_ms(),
            incoming_marker: default_incoming_marker(),
            outgoing_marker: default_outgoing_marker(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default location (config/default.toml) or fall back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config/default.toml");
        if config_path.exists() {
            return Self::load_from(&config_path);
        }
        Ok(Config::default())
    }

    /// Full path of the log file to tail.
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }

    pub fn chat_markers(&self) -> ChatMarkers {
        ChatMarkers {
            incoming: self.incoming_marker.clone(),
            outgoing: self.outgoing_marker.clone(),
        }
    }
}
