use std::io;

/// Custom error type for pushsite operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("webhook validation failed: {0}")]
    Validation(String),

    #[error("'{program}' failed: {message}")]
    Subprocess { program: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Helper type for Results that use Error
pub type Result<T> = std::result::Result<T, Error>;
