//! Configuration loading and management
//!
//! Handles parsing of `.taskflow.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{Priority, TaskStatus};

pub const CONFIG_FILENAME: &str = ".taskflow.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Board presentation settings
    #[serde(default)]
    pub board: BoardConfig,

    /// Author configuration
    #[serde(default)]
    pub author: AuthorConfig,

    /// New-task defaults
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            author: AuthorConfig::default(),
            tasks: TasksConfig::default(),
        }
    }
}

/// Board-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Board title shown in headers
    #[serde(default = "default_board_name")]
    pub name: String,

    /// Start sessions from the sample data instead of an empty board
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_board_name() -> String {
    "TaskFlow".to_string()
}

fn default_seed() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: default_board_name(),
            seed: default_seed(),
        }
    }
}

/// Author-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorConfig {
    /// Default author name when none specified
    #[serde(default = "default_author")]
    pub default: String,
}

fn default_author() -> String {
    "Current User".to_string()
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            default: default_author(),
        }
    }
}

/// New-task defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Status assigned when a new task does not specify one
    #[serde(default)]
    pub default_status: TaskStatus,

    /// Priority assigned when a new task does not specify one
    #[serde(default)]
    pub default_priority: Priority,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_status: TaskStatus::default(),
            default_priority: Priority::default(),
        }
    }
}

impl Config {
    /// Load configuration from a `.taskflow.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults when the file
    /// is absent or unreadable.
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Resolve the effective configuration: an explicit path must parse, an
    /// implicit lookup falls back to defaults.
    pub fn resolve(explicit: Option<&PathBuf>) -> crate::error::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::load_from_dir(Path::new("."))),
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.author.default.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "author.default cannot be empty".to_string(),
            ));
        }
        if self.board.name.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "board.name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
