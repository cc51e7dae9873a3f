//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Durable slot read or replace failure.
    Storage(String),
    /// Persisted snapshot could not be decoded.
    Snapshot(String),
    /// Line channel read or write failure.
    Channel(String),
    /// The line channel has no more input.
    EndOfInput,
    /// Malformed or out-of-range user input.
    Input(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
            Self::Snapshot(msg) => write!(f, "snapshot: {msg}"),
            Self::Channel(msg) => write!(f, "channel: {msg}"),
            Self::EndOfInput => write!(f, "channel: end of input"),
            Self::Input(msg) => write!(f, "input: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}
