use log4rs::config::runtime::ConfigErrors;
use log::SetLoggerError;
use crate::manager_db::errors::DBError;
use crate::manager_openweather::errors::FetchError;

/// Error representing an unrecoverable error that will halt the application
///
#[derive(Debug, thiserror::Error)]
#[error("UnrecoverableError: {0}")]
pub struct UnrecoverableError(pub String);

impl From<std::io::Error> for UnrecoverableError {
    fn from(e: std::io::Error) -> Self { UnrecoverableError(e.to_string()) }
}
impl From<ConfigError> for UnrecoverableError {
    fn from(e: ConfigError) -> Self { UnrecoverableError(e.to_string()) }
}
impl From<FetchError> for UnrecoverableError {
    fn from(e: FetchError) -> Self { UnrecoverableError(e.to_string()) }
}

/// Errors while managing configuration
///
#[derive(Debug, thiserror::Error)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<SetLoggerError> for ConfigError {
    fn from(e: SetLoggerError) -> Self { ConfigError(e.to_string()) }
}
impl From<ConfigErrors> for ConfigError {
    fn from(e: ConfigErrors) -> Self { ConfigError(e.to_string()) }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}

/// Errors surfaced by the weather and favourite use cases
///
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("WeatherError::Transport: {0}")]
    Transport(String),
    #[error("WeatherError::InvalidData")]
    InvalidData,
    #[error("WeatherError::LocationAlreadyExists")]
    LocationAlreadyExists,
    #[error("WeatherError::LocationDoesNotExist")]
    LocationDoesNotExist,
    #[error("WeatherError::Persistence: {0}")]
    Persistence(#[from] DBError),
    #[error("WeatherError::Task: {0}")]
    Task(String),
}

impl From<FetchError> for WeatherError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Transport(e) => WeatherError::Transport(e),
            FetchError::InvalidData => WeatherError::InvalidData,
        }
    }
}
impl From<tokio::task::JoinError> for WeatherError {
    fn from(e: tokio::task::JoinError) -> Self { WeatherError::Task(e.to_string()) }
}
