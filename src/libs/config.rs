//! Configuration management for taskdash.
//!
//! Settings live in a pretty-printed JSON file inside the platform data
//! directory (see [`DataStorage`]). A missing file means defaults; every
//! section is optional in the file so older configs keep loading.
//!
//! ## Sections
//!
//! - **database**: store location and connection pool size
//! - **dashboard**: acting user, category breakdown size, activity window
//!
//! The `TASKDASH_DB` environment variable (also read from `.env`) overrides
//! the database path.
//!
//! ```rust,no_run
//! use taskdash::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("database at {}", config.database_path()?.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::task::UserId;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Default database file name inside the data directory.
pub const DB_FILE_NAME: &str = "taskdash.db";
/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "TASKDASH_DB";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    /// Explicit database file; the data directory is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Maximum number of pooled connections.
    pub pool_size: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    /// User recorded as creator/assignee of new tasks.
    pub user_id: i64,

    /// How many categories the breakdown chart shows.
    pub category_limit: usize,

    /// Length of the recent-activity window in days.
    pub activity_days: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: None,
            pool_size: 5,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            user_id: 1,
            category_limit: 10,
            activity_days: 7,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Reads the configuration from the data directory.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads the configuration from `path`; a missing file yields defaults.
    pub fn read_from(path: &Path) -> Result<Config> {
        // No file yet: run with defaults
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration to the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    /// Writes the configuration to `path` as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolves the database file: environment, then config, then data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Ok(path) = env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        Ok(DataStorage::new().get_path(DB_FILE_NAME)?)
    }

    /// Acting user for writes.
    pub fn user(&self) -> UserId {
        UserId(self.dashboard.user_id)
    }

    /// Interactive setup wizard.
    ///
    /// Starts from the saved configuration (or defaults) and prompts for each
    /// setting. The result is returned unsaved.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigModuleDatabase);
        let default_path = config
            .database
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(default_path)
            .allow_empty(true)
            .interact_text()?;
        config.database.path = Some(path.trim().to_string()).filter(|p| !p.is_empty()).map(PathBuf::from);

        config.database.pool_size = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPoolSize.to_string())
            .default(config.database.pool_size)
            .validate_with(|size: &u32| if *size > 0 { Ok(()) } else { Err(Message::PoolSizeRange.to_string()) })
            .interact_text()?;

        msg_print!(Message::ConfigModuleDashboard);
        config.dashboard.user_id = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUserId.to_string())
            .default(config.dashboard.user_id)
            .interact_text()?;

        config.dashboard.category_limit = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryLimit.to_string())
            .default(config.dashboard.category_limit)
            .interact_text()?;

        config.dashboard.activity_days = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptActivityDays.to_string())
            .default(config.dashboard.activity_days)
            .interact_text()?;

        Ok(config)
    }
}
