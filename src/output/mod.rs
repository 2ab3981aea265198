//! Output module for console output.
//!
//! Provides:
//! - Colored status messages
//! - Rendering of split paths, collections and images

pub mod console;
pub mod records;

pub use console::{print_error, print_info, print_success, print_warning};
pub use records::{
    collection_line, image_line, print_collection, print_image, print_split, split_json,
};
