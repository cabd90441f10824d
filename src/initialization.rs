use std::env;
use std::fs;
use std::str::FromStr;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::models::Coordinates;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct DBConfig {
    pub db_path: String,
}

#[derive(Deserialize)]
pub struct OpenWeatherConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct LocationConfig {
    pub lat: f64,
    pub long: f64,
}

#[derive(Deserialize)]
pub struct Refresh {
    pub interval_secs: u64,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub web_server: WebServer,
    pub db: DBConfig,
    pub open_weather: OpenWeatherConfig,
    pub location: Option<LocationConfig>,
    pub refresh: Refresh,
}

impl Config {
    /// Initial current location, if configured
    pub fn current_location(&self) -> Option<Coordinates> {
        self.location.as_ref().map(|l| Coordinates { latitude: l.lat, longitude: l.long })
    }
}

/// Returns the configuration and initializes logging
///
/// The config file is given by the '--config' argument, the CONFIG_PATH environment variable
/// or defaults to config.toml in the working directory.
pub fn config() -> Result<Config, ConfigError> {
    let path = config_path(env::args().skip(1));
    let toml = fs::read_to_string(&path)
        .map_err(|e| ConfigError(format!("failed to read {}: {}", path, e)))?;
    let config = parse_config(&toml)?;

    let log_level = LevelFilter::from_str(&config.general.log_level)
        .map_err(|_| ConfigError(format!("invalid log level: {}", config.general.log_level)))?;
    setup_logger(&config.general.log_path, log_level, config.general.log_to_stdout)?;

    Ok(config)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;
    if config.refresh.interval_secs == 0 {
        return Err(ConfigError::from("refresh interval must be greater than zero"));
    }

    Ok(config)
}

fn config_path(mut args: impl Iterator<Item = String>) -> String {
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return path;
            }
        }
    }

    env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}
