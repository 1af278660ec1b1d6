// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Persistence for projects.
//!
//! Projects are stored as documents under string keys. [`ProjectFolder`] keeps one `.lcp` file
//! per key on disk; [`MemoryStore`] keeps them in memory for hosts without a filesystem.

pub mod memory;
pub mod project_folder;

use std::io;
use std::path::PathBuf;

use crate::format::{Document, ImportFormatError};

pub use memory::MemoryStore;
pub use project_folder::{ProjectFolder, WriteDurability};

/// Key-value storage for project documents.
pub trait StorageService {
    fn save(&mut self, key: &str, document: &Document) -> Result<(), StoreError>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Document>, StoreError>;

    /// Stored keys in ascending order.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Returns whether anything was removed.
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid project document at {path:?}: {source}")]
    Document {
        path: PathBuf,
        source: Box<ImportFormatError>,
    },
    #[error("invalid storage key {key:?}")]
    InvalidKey { key: String },
    #[error("refusing to follow symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
}

/// Keys must be non-empty and must not be pure whitespace.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.trim().is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}
