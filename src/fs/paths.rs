//! Path and directory management.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::Result;

/// File name of the collection store inside the data directory.
pub const STORE_FILE_NAME: &str = "collections.json";

/// Default location of the collection store.
///
/// Uses the platform data directory, falling back to the current directory
/// when no home directory can be determined.
pub fn default_store_path() -> PathBuf {
    match ProjectDirs::from("org", "statmap", "statmap-vault") {
        Some(dirs) => dirs.data_dir().join(STORE_FILE_NAME),
        None => PathBuf::from(STORE_FILE_NAME),
    }
}

/// Ensure the parent directory of a file exists, creating it if necessary.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
