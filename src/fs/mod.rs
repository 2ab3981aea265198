//! Filesystem module.
//!
//! Provides:
//! - Filename splitting with compound extensions (`.nii.gz`, `.tar.gz`)
//! - Store path resolution

pub mod naming;
pub mod paths;

pub use naming::{split_filename, FilenameParts, Splitter, SPECIAL_EXTENSIONS};
pub use paths::{default_store_path, ensure_parent_dir};
