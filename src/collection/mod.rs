//! Collection registry.
//!
//! Provides:
//! - Collection and image records
//! - A JSON-file-backed store that enforces private token uniqueness
//! - Collection editing and lookup by private token
//! - Image editing, removal, lookup by id and listing by tag

pub mod model;
pub mod store;

pub use model::{Collection, CollectionUpdate, Image, ImageUpdate, NewCollection, NewImage};
pub use store::{CollectionStore, DEFAULT_CLAIM_RETRIES};
