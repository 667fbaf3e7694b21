use std::env;
use std::path::PathBuf;

pub const DEFAULT_ACTIVITY_CAPACITY: usize = 1000;
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 500;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub activity_capacity: usize,
    pub notification_capacity: usize,
    pub log_filter: String,
    pub service_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".projectdeck"),
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            log_filter: "projectdeck=info".to_string(),
            service_name: "projectdeck".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let data_dir = env::var("PROJECTDECK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let activity_capacity =
            capacity_from_env("ACTIVITY_LOG_CAPACITY", defaults.activity_capacity)?;

        let notification_capacity =
            capacity_from_env("NOTIFICATION_LOG_CAPACITY", defaults.notification_capacity)?;

        let log_filter = env::var("LOG_FILTER").unwrap_or(defaults.log_filter);

        let service_name = env::var("SERVICE_NAME").unwrap_or(defaults.service_name);

        Ok(Config {
            data_dir,
            activity_capacity,
            notification_capacity,
            log_filter,
            service_name,
        })
    }
}

fn capacity_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_capacity(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_capacity(name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(ConfigError::InvalidCapacity {
            name,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidCapacity { name: &'static str, value: String },
}
