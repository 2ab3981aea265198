//! Collection and image records.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A group of statistical maps with an owner and an optional private token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: u64,
    pub name: String,
    pub owner: String,

    /// Token granting non-owner access through a shareable URL.
    #[serde(default)]
    pub private_token: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Collection {
    /// Public URL of the collection.
    pub fn absolute_url(&self) -> String {
        format!("/collections/{}/", self.id)
    }

    /// Shareable URL for private collections.
    pub fn private_url(&self) -> Option<String> {
        self.private_token
            .as_ref()
            .map(|token| format!("/collections/{}/", token))
    }

    pub fn is_private(&self) -> bool {
        self.private_token.is_some()
    }
}

/// A statistical map belonging to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
    pub collection_id: u64,
    pub name: String,

    /// Path of the uploaded map file.
    pub file: String,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    pub created_at: DateTime<Utc>,
}

impl Image {
    pub fn absolute_url(&self) -> String {
        format!("/images/{}/", self.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Fields needed to create a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub name: String,
    pub owner: String,
    pub private: bool,
}

/// Fields needed to add an image to a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewImage {
    pub collection_id: u64,
    pub file: String,

    /// Display name; defaults to the file's stem.
    pub name: Option<String>,

    pub tags: Vec<String>,
}

/// Changes to an existing collection. `None` leaves a field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionUpdate {
    pub name: Option<String>,
    pub owner: Option<String>,

    /// `Some(true)` makes the collection private, `Some(false)` public.
    pub private: Option<bool>,
}

/// Changes to an existing image. `None` leaves a field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageUpdate {
    pub name: Option<String>,

    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_urls() {
        let mut collection = Collection {
            id: 12,
            name: "Working memory".into(),
            owner: "alice".into(),
            private_token: None,
            created_at: Utc::now(),
        };
        assert_eq!(collection.absolute_url(), "/collections/12/");
        assert_eq!(collection.private_url(), None);
        assert!(!collection.is_private());

        collection.private_token = Some("KXQWERTY".into());
        assert_eq!(
            collection.private_url().as_deref(),
            Some("/collections/KXQWERTY/")
        );
    }

    #[test]
    fn test_image_tags() {
        let image = Image {
            id: 3,
            collection_id: 1,
            name: "zstat1".into(),
            file: "maps/zstat1.nii.gz".into(),
            tags: ["motor".to_string()].into_iter().collect(),
            created_at: Utc::now(),
        };
        assert_eq!(image.absolute_url(), "/images/3/");
        assert!(image.has_tag("motor"));
        assert!(!image.has_tag("Motor"));
    }
}
