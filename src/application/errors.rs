//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Socket error: {0}")]
    Socket(#[from] SocketError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors reported by the messaging socket
#[derive(Error, Debug)]
pub enum SocketError {
    #[error("Send failed: {0}")]
    Send(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Socket error: {0}")]
    Socket(#[from] SocketError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Settings store errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Settings lock poisoned")]
    Poisoned,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
