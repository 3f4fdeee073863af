//! Disk storage for course catalogs.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::StoreError;
use crate::domain::Catalog;

/// A catalog saved as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the catalog.
    ///
    /// The file is fully re-validated, so a hand-edited catalog that breaks
    /// an invariant is rejected here.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        let catalog: Catalog =
            serde_json::from_str(&contents).map_err(|source| StoreError::Format {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), courses = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Load the catalog, or an empty one if the file does not exist yet.
    pub fn load_or_default(&self) -> Result<Catalog, StoreError> {
        if !self.path.exists() {
            return Ok(Catalog::new());
        }
        self.load()
    }

    /// Save the catalog.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(catalog).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), courses = catalog.len(), "saved catalog");
        Ok(())
    }

    /// Get the catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
