//! Flat-file backend: the whole catalog lives in one pretty-printed JSON
//! document that is read, mutated in memory, and rewritten on every change.

use crate::domain::models::{Collection, Movie, User};
use crate::services::storage::{MovieStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, Serialize)]
struct CatalogDoc {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    collections: BTreeMap<i64, Collection>,
}

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_doc(&self) -> Result<CatalogDoc, StoreError> {
        if !self.path.exists() {
            return Ok(CatalogDoc::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(CatalogDoc::default());
        }
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn write_doc(&self, doc: &CatalogDoc) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw =
            serde_json::to_string_pretty(doc).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl MovieStore for JsonStore {
    fn users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read_doc()?.users)
    }

    fn ensure_user(&mut self, username: &str) -> Result<User, StoreError> {
        let mut doc = self.read_doc()?;
        if let Some(user) = doc.users.iter().find(|u| u.username == username) {
            return Ok(user.clone());
        }
        let id = doc.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: username.to_string(),
        };
        doc.users.push(user.clone());
        self.write_doc(&doc)?;
        Ok(user)
    }

    fn load(&self, user_id: i64) -> Result<Collection, StoreError> {
        Ok(self
            .read_doc()?
            .collections
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&mut self, user_id: i64, movies: &Collection) -> Result<(), StoreError> {
        let mut doc = self.read_doc()?;
        doc.collections.insert(user_id, movies.clone());
        self.write_doc(&doc)
    }

    fn find(&self, user_id: i64, title: &str) -> Result<Movie, StoreError> {
        self.load(user_id)?
            .remove(title)
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    fn upsert(&mut self, user_id: i64, movie: &Movie) -> Result<(), StoreError> {
        let mut doc = self.read_doc()?;
        doc.collections
            .entry(user_id)
            .or_default()
            .insert(movie.title.clone(), movie.clone());
        self.write_doc(&doc)
    }

    fn delete(&mut self, user_id: i64, title: &str) -> Result<(), StoreError> {
        let mut doc = self.read_doc()?;
        let removed = doc
            .collections
            .get_mut(&user_id)
            .and_then(|movies| movies.remove(title));
        if removed.is_none() {
            return Err(StoreError::NotFound(title.to_string()));
        }
        self.write_doc(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::contract;
    use tempfile::TempDir;

    #[test]
    fn satisfies_store_contract() {
        let tmp = TempDir::new().expect("temp dir");
        let mut store = JsonStore::open(tmp.path().join("catalog.json"));
        contract::exercise(&mut store);
    }

    #[test]
    fn missing_file_reads_as_empty_catalog() {
        let tmp = TempDir::new().expect("temp dir");
        let store = JsonStore::open(tmp.path().join("nope.json"));
        assert!(store.users().expect("users").is_empty());
        assert!(store.load(1).expect("load").is_empty());
    }

    #[test]
    fn garbage_file_reports_corrupt_not_panic() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("catalog.json");
        std::fs::write(&path, "{not json").expect("write");
        let store = JsonStore::open(path);
        assert!(matches!(store.users(), Err(StoreError::Corrupt(_))));
    }
}
