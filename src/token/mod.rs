//! Private-access token generation.
//!
//! Provides:
//! - The `TokenRegistry` existence-check capability
//! - Random uppercase token generation with collision retry

pub mod generator;
pub mod registry;

pub use generator::{generate_url_token, TokenGenerator, DEFAULT_TOKEN_LENGTH, TOKEN_ALPHABET};
pub use registry::TokenRegistry;
