// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


use std::collections::BTreeMap;

use super::{validate_key, StorageService, StoreError};
use crate::format::Document;

/// In-memory [`StorageService`]. Documents are cloned in and out.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl StorageService for MemoryStore {
    fn save(&mut self, key: &str, document: &Document) -> Result<(), StoreError> {
        validate_key(key)?;
        self.documents.insert(key.to_owned(), document.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Document>, StoreError> {
        validate_key(key)?;
        Ok(self.documents.get(key).cloned())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        Ok(self.documents.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::format::to_document;
    use crate::model::fixtures::linear_chain;
    use crate::store::{StorageService, StoreError};

    #[test]
    fn save_load_list_delete() {
        let (project, _, _) = linear_chain();
        let document = to_document(&project);
        let mut store = MemoryStore::new();

        store.save("b", &document).expect("save");
        store.save("a", &document).expect("save");
        assert_eq!(store.list().expect("list"), vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(store.load("a").expect("load"), Some(document));
        assert_eq!(store.load("zzz").expect("load"), None);

        assert!(store.delete("a").expect("delete"));
        assert!(!store.delete("a").expect("delete"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn blank_keys_are_rejected() {
        let mut store = MemoryStore::new();
        let err = store.delete("  ").expect_err("blank");
        assert!(matches!(err, StoreError::InvalidKey { .. }));
    }
}
