//! Rendering of split results, collections and images.

use console::style;
use serde_json::json;

use crate::collection::{Collection, Image};
use crate::error::Result;
use crate::fs::FilenameParts;

/// Print a split path as aligned fields.
pub fn print_split(path: &str, parts: &FilenameParts) {
    println!("{}", style(path).bold());
    println!("  Directory: {}", parts.directory);
    println!("  Stem:      {}", parts.stem);
    println!("  Extension: {}", parts.extension);
}

/// Render a split path as a single JSON line.
pub fn split_json(path: &str, parts: &FilenameParts) -> Result<String> {
    let value = json!({
        "path": path,
        "directory": parts.directory,
        "stem": parts.stem,
        "extension": parts.extension,
    });
    Ok(serde_json::to_string(&value)?)
}

/// One-line summary of a collection.
pub fn collection_line(collection: &Collection) -> String {
    let visibility = if collection.is_private() {
        "private"
    } else {
        "public"
    };
    format!(
        "{:>4}  {}  (owner: {}, {})",
        collection.id, collection.name, collection.owner, visibility
    )
}

/// Print a collection and its images.
pub fn print_collection(collection: &Collection, images: &[&Image]) {
    println!();
    println!("{}", style(format!("Collection {}:", collection.name)).bold());
    println!("  ID:      {}", collection.id);
    println!("  Owner:   {}", collection.owner);
    println!("  URL:     {}", collection.absolute_url());
    if let Some(url) = collection.private_url() {
        println!("  Private: {}", style(url).yellow());
    }
    println!(
        "  Created: {}",
        collection.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Images:  {}", images.len());
    for image in images {
        println!("    {}", image_line(image));
    }
}

/// One-line summary of an image.
pub fn image_line(image: &Image) -> String {
    let tags: Vec<&str> = image.tags.iter().map(String::as_str).collect();
    if tags.is_empty() {
        format!("{:>4}  {}  {}", image.id, image.name, image.file)
    } else {
        format!(
            "{:>4}  {}  {}  [{}]",
            image.id,
            image.name,
            image.file,
            tags.join(", ")
        )
    }
}

/// Print an image in detail.
pub fn print_image(image: &Image) {
    println!();
    println!("{}", style(format!("Image {}:", image.name)).bold());
    println!("  ID:         {}", image.id);
    println!("  Collection: {}", image.collection_id);
    println!("  File:       {}", image.file);
    println!("  URL:        {}", image.absolute_url());
    if !image.tags.is_empty() {
        let tags: Vec<&str> = image.tags.iter().map(String::as_str).collect();
        println!("  Tags:       {}", tags.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::split_filename;
    use chrono::Utc;

    #[test]
    fn test_split_json() {
        let line = split_json("/data/s.nii.gz", &split_filename("/data/s.nii.gz")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["directory"], "/data");
        assert_eq!(value["stem"], "s");
        assert_eq!(value["extension"], ".nii.gz");
    }

    #[test]
    fn test_summary_lines() {
        let collection = Collection {
            id: 2,
            name: "Pain".into(),
            owner: "alice".into(),
            private_token: Some("ABCDEFGH".into()),
            created_at: Utc::now(),
        };
        assert_eq!(
            collection_line(&collection),
            "   2  Pain  (owner: alice, private)"
        );

        let image = Image {
            id: 5,
            collection_id: 2,
            name: "zstat".into(),
            file: "zstat.nii.gz".into(),
            tags: ["visual".to_string(), "motor".to_string()].into_iter().collect(),
            created_at: Utc::now(),
        };
        assert_eq!(
            image_line(&image),
            "   5  zstat  zstat.nii.gz  [motor, visual]"
        );
    }
}
