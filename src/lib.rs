//! statmap-vault - collection registry utilities for a statistical map host
//!
//! This library provides the data-layer helpers behind a site that hosts
//! neuroimaging statistical maps.
//!
//! # Features
//!
//! - Filename splitting aware of compound extensions (`.nii.gz`, `.tar.gz`)
//! - Random private-access tokens checked against an injected registry
//! - A JSON-file-backed collection store that rejects duplicate tokens on insert
//! - Image lookup by id and listing by tag
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use statmap_vault::{CollectionStore, NewCollection, TokenGenerator};
//!
//! fn main() -> statmap_vault::Result<()> {
//!     let mut store = CollectionStore::open(Path::new("collections.json"))?;
//!     let collection = store.create_collection(
//!         NewCollection {
//!             name: "Working memory".into(),
//!             owner: "alice".into(),
//!             private: true,
//!         },
//!         &TokenGenerator::default(),
//!     )?;
//!     store.save()?;
//!
//!     println!("{:?}", collection.private_url());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod fs;
pub mod output;
pub mod token;

// Re-exports for convenience
pub use collection::{
    Collection, CollectionStore, CollectionUpdate, Image, ImageUpdate, NewCollection, NewImage,
};
pub use config::Config;
pub use error::{Error, Result};
pub use fs::{split_filename, FilenameParts, Splitter};
pub use token::{generate_url_token, TokenGenerator, TokenRegistry};
