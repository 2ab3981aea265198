//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Upper bound on token length.
const MAX_TOKEN_LENGTH: usize = 64;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_token_length(config.token.length)?;
    validate_claim_retries(config.token.claim_retries)?;
    validate_special_extensions(&config.split.special_extensions)?;

    Ok(())
}

/// Validate the private token length.
pub fn validate_token_length(length: usize) -> Result<()> {
    if length == 0 || length > MAX_TOKEN_LENGTH {
        return Err(Error::ConfigValidation {
            field: "token.length".to_string(),
            message: format!(
                "Token length must be between 1 and {} (got {})",
                MAX_TOKEN_LENGTH, length
            ),
        });
    }

    Ok(())
}

/// Validate the insert retry count.
pub fn validate_claim_retries(claim_retries: u32) -> Result<()> {
    if claim_retries == 0 {
        return Err(Error::ConfigValidation {
            field: "token.claim_retries".to_string(),
            message: "At least one insert attempt is required".to_string(),
        });
    }

    Ok(())
}

/// Validate compound extensions such as `.nii.gz`.
pub fn validate_special_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<()> {
    // Two or more dot-separated alphanumeric segments.
    let pattern = Regex::new(r"^(\.[A-Za-z0-9]+){2,}$")
        .map_err(|e| Error::Config(format!("Invalid extension pattern: {}", e)))?;

    for extension in extensions {
        let extension = extension.as_ref();
        if !pattern.is_match(extension) {
            return Err(Error::ConfigValidation {
                field: "split.special_extensions".to_string(),
                message: format!(
                    "'{}' is not a compound extension (expected something like '.nii.gz')",
                    extension
                ),
            });
        }
    }

    Ok(())
}
