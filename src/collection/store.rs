//! JSON-file-backed collection store.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::collection::model::{
    Collection, CollectionUpdate, Image, ImageUpdate, NewCollection, NewImage,
};
use crate::error::{Error, Result};
use crate::fs::{ensure_parent_dir, split_filename};
use crate::token::{TokenGenerator, TokenRegistry};

/// Default number of insert attempts when a generated token is already taken.
pub const DEFAULT_CLAIM_RETRIES: u32 = 3;

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    collections: Vec<Collection>,

    #[serde(default)]
    images: Vec<Image>,
}

/// Collections and images held in memory and persisted as one JSON document.
#[derive(Debug)]
pub struct CollectionStore {
    path: PathBuf,
    data: StoreData,
    claim_retries: u32,
}

impl CollectionStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No store at {}, starting empty", path.display());
                StoreData::default()
            }
            Err(e) => return Err(Error::Io(e)),
        };
        check_integrity(&data)?;

        tracing::debug!(
            "Opened store {} ({} collections, {} images)",
            path.display(),
            data.collections.len(),
            data.images.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            data,
            claim_retries: DEFAULT_CLAIM_RETRIES,
        })
    }

    /// Set how many times a token conflict on insert is retried with a fresh token.
    pub fn with_claim_retries(mut self, claim_retries: u32) -> Self {
        self.claim_retries = claim_retries.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store back to disk.
    ///
    /// The document is written to a temporary file next to the store and
    /// renamed over it, so readers see either the old or the new contents.
    pub fn save(&self) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let content = serde_json::to_string_pretty(&self.data)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved store to {}", self.path.display());
        Ok(())
    }

    pub fn collections(&self) -> &[Collection] {
        &self.data.collections
    }

    /// Look up a collection by id.
    pub fn collection(&self, id: u64) -> Result<&Collection> {
        self.data
            .collections
            .iter()
            .find(|c| c.id == id)
            .ok_or(Error::CollectionNotFound(id))
    }

    /// Look up a collection through its private-access token.
    pub fn collection_by_token(&self, token: &str) -> Result<&Collection> {
        self.data
            .collections
            .iter()
            .find(|c| c.private_token.as_deref() == Some(token))
            .ok_or_else(|| Error::Store(format!("No collection with token '{}'", token)))
    }

    fn collection_mut(&mut self, id: u64) -> Result<&mut Collection> {
        self.data
            .collections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::CollectionNotFound(id))
    }

    /// Edit an existing collection.
    ///
    /// Making a collection private gives it a fresh token from `generator`;
    /// making it public drops its token. A collection that is already private
    /// keeps its token.
    pub fn update_collection(
        &mut self,
        id: u64,
        update: CollectionUpdate,
        generator: &TokenGenerator,
    ) -> Result<Collection> {
        let current = self.collection(id)?;

        let name = match update.name.as_deref().map(str::trim) {
            Some("") => {
                return Err(Error::Store("Collection name cannot be empty".to_string()))
            }
            Some(name) => name.to_string(),
            None => current.name.clone(),
        };
        let owner = match update.owner.as_deref().map(str::trim) {
            Some("") => {
                return Err(Error::Store("Collection owner cannot be empty".to_string()))
            }
            Some(owner) => owner.to_string(),
            None => current.owner.clone(),
        };
        let private_token = match (update.private, &current.private_token) {
            (Some(true), None) => Some(generator.generate(&*self)?),
            (Some(false), _) => None,
            (_, token) => token.clone(),
        };

        let collection = self.collection_mut(id)?;
        collection.name = name;
        collection.owner = owner;
        collection.private_token = private_token;

        tracing::info!("Updated collection {} '{}'", collection.id, collection.name);
        Ok(collection.clone())
    }

    /// Insert a collection holding `token`.
    ///
    /// This is the authoritative uniqueness check for private tokens: a token
    /// held by another collection is rejected with `Error::TokenConflict`.
    pub fn insert_collection(
        &mut self,
        new: NewCollection,
        token: Option<String>,
    ) -> Result<Collection> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::Store("Collection name cannot be empty".to_string()));
        }
        let owner = new.owner.trim();
        if owner.is_empty() {
            return Err(Error::Store("Collection owner cannot be empty".to_string()));
        }

        if let Some(token) = &token {
            if self.token_exists(token)? {
                return Err(Error::TokenConflict(token.clone()));
            }
        }

        let collection = Collection {
            id: next_id(self.data.collections.iter().map(|c| c.id))?,
            name: name.to_string(),
            owner: owner.to_string(),
            private_token: token,
            created_at: Utc::now(),
        };

        tracing::info!(
            "Created collection {} '{}' for {}",
            collection.id,
            collection.name,
            collection.owner
        );
        self.data.collections.push(collection.clone());
        Ok(collection)
    }

    /// Create a collection, generating a private token when requested.
    pub fn create_collection(
        &mut self,
        new: NewCollection,
        generator: &TokenGenerator,
    ) -> Result<Collection> {
        self.claim_token(new, |store| generator.generate(store))
    }

    /// Insert a collection with tokens from `next_token`, retrying on conflict.
    ///
    /// `next_token` sees the store as it is before each attempt.
    pub fn claim_token<F>(&mut self, new: NewCollection, mut next_token: F) -> Result<Collection>
    where
        F: FnMut(&Self) -> Result<String>,
    {
        if !new.private {
            return self.insert_collection(new, None);
        }

        let mut attempt = 1;
        loop {
            let token = next_token(&*self)?;
            match self.insert_collection(new.clone(), Some(token)) {
                Err(Error::TokenConflict(token)) if attempt < self.claim_retries => {
                    tracing::warn!(
                        "Token {} was claimed concurrently, retrying ({}/{})",
                        token,
                        attempt,
                        self.claim_retries
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Add an image to an existing collection.
    pub fn add_image(&mut self, new: NewImage) -> Result<Image> {
        self.collection(new.collection_id)?;

        let name = match new.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => split_filename(&new.file).stem,
        };
        if name.is_empty() {
            return Err(Error::Store(format!(
                "Cannot derive an image name from '{}'",
                new.file
            )));
        }

        let tags = normalize_tags(&new.tags);

        let image = Image {
            id: next_id(self.data.images.iter().map(|i| i.id))?,
            collection_id: new.collection_id,
            name,
            file: new.file,
            tags,
            created_at: Utc::now(),
        };

        tracing::info!(
            "Added image {} '{}' to collection {}",
            image.id,
            image.name,
            image.collection_id
        );
        self.data.images.push(image.clone());
        Ok(image)
    }

    /// Look up an image by id.
    pub fn image(&self, id: u64) -> Result<&Image> {
        self.data
            .images
            .iter()
            .find(|i| i.id == id)
            .ok_or(Error::ImageNotFound(id))
    }

    /// Rename an image or replace its tags.
    pub fn update_image(&mut self, id: u64, update: ImageUpdate) -> Result<Image> {
        let image = self
            .data
            .images
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(Error::ImageNotFound(id))?;

        if let Some(name) = update.name.as_deref().map(str::trim) {
            if name.is_empty() {
                return Err(Error::Store("Image name cannot be empty".to_string()));
            }
            image.name = name.to_string();
        }
        if let Some(tags) = &update.tags {
            image.tags = normalize_tags(tags);
        }

        tracing::info!("Updated image {} '{}'", image.id, image.name);
        Ok(image.clone())
    }

    /// Remove an image, returning it.
    pub fn remove_image(&mut self, id: u64) -> Result<Image> {
        let pos = self
            .data
            .images
            .iter()
            .position(|i| i.id == id)
            .ok_or(Error::ImageNotFound(id))?;
        let image = self.data.images.remove(pos);

        tracing::info!(
            "Removed image {} from collection {}",
            image.id,
            image.collection_id
        );
        Ok(image)
    }

    /// Images carrying `tag`, ordered by id.
    pub fn images_by_tag(&self, tag: &str) -> Vec<&Image> {
        let mut images: Vec<&Image> = self
            .data
            .images
            .iter()
            .filter(|i| i.has_tag(tag))
            .collect();
        images.sort_by_key(|i| i.id);
        images
    }

    /// Images belonging to a collection, ordered by id.
    pub fn images_in(&self, collection_id: u64) -> Result<Vec<&Image>> {
        self.collection(collection_id)?;
        let mut images: Vec<&Image> = self
            .data
            .images
            .iter()
            .filter(|i| i.collection_id == collection_id)
            .collect();
        images.sort_by_key(|i| i.id);
        Ok(images)
    }
}

impl TokenRegistry for CollectionStore {
    fn token_exists(&self, token: &str) -> Result<bool> {
        Ok(self
            .data
            .collections
            .iter()
            .any(|c| c.private_token.as_deref() == Some(token)))
    }
}

fn next_id<I: Iterator<Item = u64>>(ids: I) -> Result<u64> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| Error::Store("id space exhausted".to_string())),
    }
}

fn normalize_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reject documents that break id or token uniqueness, or hold orphaned images.
fn check_integrity(data: &StoreData) -> Result<()> {
    let mut ids = HashSet::new();
    let mut tokens = HashSet::new();
    for collection in &data.collections {
        if !ids.insert(collection.id) {
            return Err(Error::Store(format!(
                "Duplicate collection id {}",
                collection.id
            )));
        }
        if let Some(token) = &collection.private_token {
            if !tokens.insert(token.as_str()) {
                return Err(Error::Store(format!(
                    "Private token '{}' is held by more than one collection",
                    token
                )));
            }
        }
    }

    let mut image_ids = HashSet::new();
    for image in &data.images {
        if !image_ids.insert(image.id) {
            return Err(Error::Store(format!("Duplicate image id {}", image.id)));
        }
        if !ids.contains(&image.collection_id) {
            return Err(Error::Store(format!(
                "Image {} belongs to missing collection {}",
                image.id, image.collection_id
            )));
        }
    }

    Ok(())
}
