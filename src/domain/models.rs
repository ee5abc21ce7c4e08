use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One catalog entry. `title` doubles as the unique key within a user's
/// collection, so it never changes after creation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A user's collection keyed by exact title.
pub type Collection = BTreeMap<String, Movie>;

/// Per-session context handed to every menu handler: the active user and
/// their fully loaded collection. Mutating handlers keep this in step with
/// persistent storage.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub movies: Collection,
}

impl Session {
    pub fn new(user: User, movies: Collection) -> Self {
        Self { user, movies }
    }
}
