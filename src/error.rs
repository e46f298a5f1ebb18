use thiserror::Error;

#[derive(Error, Debug)]
pub enum TunesmithError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate configuration: {0}")]
    DegenerateConfiguration(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, TunesmithError>;
