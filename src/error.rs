//! Error types for the statmap-vault application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Token errors
    #[error("Invalid token length: {0} (must be at least 1)")]
    InvalidLength(usize),

    #[error("Could not find an unused token after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },

    #[error("Private token already in use: {0}")]
    TokenConflict(String),

    // Store errors
    #[error("Collection not found: {0}")]
    CollectionNotFound(u64),

    #[error("Image not found: {0}")]
    ImageNotFound(u64),

    #[error("Store error: {0}")]
    Store(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
    pub const TOKEN_ERROR: i32 = 3;
    pub const STORE_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}

impl Error {
    /// Exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                exit_codes::CONFIG_ERROR
            }
            Error::InvalidLength(_) | Error::ExhaustedRetries { .. } | Error::TokenConflict(_) => {
                exit_codes::TOKEN_ERROR
            }
            Error::CollectionNotFound(_)
            | Error::ImageNotFound(_)
            | Error::Store(_)
            | Error::Json(_) => exit_codes::STORE_ERROR,
            Error::Io(_) => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::InvalidLength(0).exit_code(), exit_codes::TOKEN_ERROR);
        assert_eq!(Error::ImageNotFound(7).exit_code(), exit_codes::STORE_ERROR);
        assert_eq!(
            Error::Config("bad".into()).exit_code(),
            exit_codes::CONFIG_ERROR
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::ExhaustedRetries { attempts: 4 }.to_string(),
            "Could not find an unused token after 4 attempts"
        );
        assert_eq!(
            Error::TokenConflict("ABCDEFGH".into()).to_string(),
            "Private token already in use: ABCDEFGH"
        );
    }
}
