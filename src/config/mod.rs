use crate::errors::{AppError, AppResult};
use crate::models::outcome::OutcomeSet;
use crate::reminder::ReminderSettings;
use crate::utils::duration::parse_duration;
use crate::utils::path::resolve_under;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

/// Overrides the configuration directory (used by tests and portable installs).
pub const CONFIG_DIR_ENV: &str = "RLOGCHECK_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "rlogcheck.conf";
const DATABASE_FILE_NAME: &str = "rlogcheck.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval: String,
    #[serde(default = "default_snooze_interval")]
    pub snooze_interval: String,
    #[serde(default)]
    pub outcomes: OutcomeSet,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_reminder_interval() -> String {
    "2h".to_string()
}
fn default_snooze_interval() -> String {
    "10m".to_string()
}
fn default_history_limit() -> usize {
    100
}
fn default_recent_days() -> u32 {
    7
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            reminder_interval: default_reminder_interval(),
            snooze_interval: default_snooze_interval(),
            outcomes: OutcomeSet::default(),
            history_limit: default_history_limit(),
            recent_days: default_recent_days(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }

        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rlogcheck")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rlogcheck")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE_NAME)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| AppError::ConfigSave)?;
        }
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Database path with `~` expanded; relative paths live in the config dir.
    pub fn database_path(&self) -> PathBuf {
        resolve_under(&Self::config_dir(), &self.database)
    }

    /// Reminder cadence parsed and validated from the textual settings.
    pub fn reminder_settings(&self) -> AppResult<ReminderSettings> {
        let settings = ReminderSettings::new(
            parse_duration(&self.reminder_interval)?,
            parse_duration(&self.snooze_interval)?,
        );
        settings.validate()?;
        Ok(settings)
    }

    /// Initialize configuration and database files.
    ///
    /// With `is_test` the config file is left untouched. Returns the path of
    /// the database to initialize.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Self::load()?;
        if let Some(name) = custom_db {
            config.database = resolve_under(&dir, name).to_string_lossy().to_string();
        }

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(db_path)
    }
}
