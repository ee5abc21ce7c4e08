use crate::cli::Backend;
use crate::domain::models::{Collection, Movie, User};
use crate::services::storage_json::JsonStore;
use crate::services::storage_sqlite::SqliteStore;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no movie titled '{0}' in the collection")]
    NotFound(String),
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt catalog data: {0}")]
    Corrupt(String),
    #[error("database failure: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Persistence contract shared by both backends. Titles are exact-match,
/// case-sensitive keys; `upsert` overwrites an existing entry in place, and
/// `find`/`delete` report [`StoreError::NotFound`] for absent titles.
pub trait MovieStore {
    fn users(&self) -> Result<Vec<User>, StoreError>;
    /// Create-on-first-login. Returns the existing user when the name is
    /// already taken.
    fn ensure_user(&mut self, username: &str) -> Result<User, StoreError>;
    fn load(&self, user_id: i64) -> Result<Collection, StoreError>;
    /// Replace the user's whole collection.
    fn save(&mut self, user_id: i64, movies: &Collection) -> Result<(), StoreError>;
    fn find(&self, user_id: i64, title: &str) -> Result<Movie, StoreError>;
    fn upsert(&mut self, user_id: i64, movie: &Movie) -> Result<(), StoreError>;
    fn delete(&mut self, user_id: i64, title: &str) -> Result<(), StoreError>;
}

pub fn open_store(backend: Backend, data_dir: &Path) -> Result<Box<dyn MovieStore>, StoreError> {
    std::fs::create_dir_all(data_dir)?;
    match backend {
        Backend::Json => Ok(Box::new(JsonStore::open(data_dir.join("catalog.json")))),
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(&data_dir.join("catalog.db"))?)),
    }
}

/// Append-only mutation trail next to the catalog. Failures are swallowed:
/// the audit log must never take a working session down.
pub fn audit(data_dir: &Path, action: &str, data: serde_json::Value) {
    let path = data_dir.join("audit.jsonl");
    let event = serde_json::json!({
        "ts": epoch_secs(),
        "action": action,
        "data": data,
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn epoch_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
