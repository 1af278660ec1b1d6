// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{validate_key, StorageService, StoreError};
use crate::format::{parse_document_str, Document, PROJECT_FILE_EXTENSION};

const TEMP_FILE_PREFIX: &str = ".logichart.tmp.";

/// File-backed [`StorageService`]: one `<key>.lcp` document per project under `root`.
#[derive(Debug, Clone)]
pub struct ProjectFolder {
    root: PathBuf,
    durability: WriteDurability,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Flushes file contents and the directory entry after the rename where the platform allows.
    Durable,
}

/// Maps a storage key to a file stem that is valid on every platform.
///
/// Keys that are already safe are used verbatim; anything else becomes `~` followed by the
/// lowercase hex of its UTF-8 bytes.
fn encode_key(key: &str) -> String {
    if !needs_windows_safe_encoding(key) {
        return key.to_owned();
    }

    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(1 + key.len().saturating_mul(2));
    out.push('~');
    for &b in key.as_bytes() {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

fn decode_key(stem: &str) -> Option<String> {
    let Some(hex) = stem.strip_prefix('~') else {
        return Some(stem.to_owned());
    };
    if hex.len() % 2 != 0 {
        return None;
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect::<Option<Vec<_>>>()?;
    String::from_utf8(bytes).ok()
}

fn needs_windows_safe_encoding(segment: &str) -> bool {
    if segment.starts_with('~') || segment.starts_with('.') {
        return true;
    }
    if segment.ends_with(' ') || segment.ends_with('.') {
        return true;
    }

    let base = segment.split('.').next().unwrap_or(segment);
    if is_windows_device_name(base) {
        return true;
    }

    segment.chars().any(|ch| {
        matches!(ch, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*')
            || ch <= '\u{1f}'
            || ch == '\u{7f}'
    })
}

fn is_windows_device_name(base: &str) -> bool {
    let base = base.to_ascii_uppercase();
    match base.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        _ => base
            .strip_prefix("COM")
            .or_else(|| base.strip_prefix("LPT"))
            .is_some_and(|num| matches!(num, "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9")),
    }
}

impl ProjectFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{PROJECT_FILE_EXTENSION}", encode_key(key)))
    }
}

impl StorageService for ProjectFolder {
    fn save(&mut self, key: &str, document: &Document) -> Result<(), StoreError> {
        validate_key(key)?;
        let path = self.project_path(key);
        let json = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(&self.root, &path, &json, self.durability)?;
        tracing::debug!(key, path = %path.display(), bytes = json.len(), "saved project");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Document>, StoreError> {
        validate_key(key)?;
        let path = self.project_path(key);
        match fs::symlink_metadata(&path) {
            Ok(md) if md.file_type().is_symlink() => {
                return Err(StoreError::SymlinkRefused { path });
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        parse_document_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Document {
                path,
                source: Box::new(source),
            })
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            let is_project = path
                .extension()
                .is_some_and(|ext| ext == PROJECT_FILE_EXTENSION);
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if !is_project || stem.starts_with(TEMP_FILE_PREFIX) {
                continue;
            }
            if let Some(key) = decode_key(stem) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        let path = self.project_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key, path = %path.display(), "deleted project");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

/// Writes `contents` to a fresh temp file next to `path`, then renames it into place.
fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(root).map_err(|source| StoreError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent or file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        "{TEMP_FILE_PREFIX}{}.{nanos}",
        file_name.to_string_lossy()
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    let written = file.write_all(contents).and_then(|()| {
        if durability == WriteDurability::Durable {
            file.sync_all()
        } else {
            Ok(())
        }
    });
    drop(file);
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: tmp_path,
            source,
        });
    }

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
