//! SQLite backend. One `users` table plus one `movies` table keyed by
//! (user_id, title); upserts ride on that unique constraint.

use crate::domain::models::{Collection, Movie, User};
use crate::services::storage::{MovieStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const SQL_CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL
);
CREATE TABLE IF NOT EXISTS movies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    year INTEGER NOT NULL,
    rating REAL NOT NULL,
    note TEXT NOT NULL DEFAULT '',
    poster_url TEXT,
    imdb_id TEXT,
    country TEXT,
    favorite INTEGER NOT NULL DEFAULT 0,
    UNIQUE(user_id, title)
);
";

const SQL_SELECT_MOVIES: &str = "
SELECT title, year, rating, note, poster_url, imdb_id, country, favorite
FROM movies WHERE user_id = ?1
";

const SQL_SELECT_MOVIE: &str = "
SELECT title, year, rating, note, poster_url, imdb_id, country, favorite
FROM movies WHERE user_id = ?1 AND title = ?2
";

const SQL_UPSERT_MOVIE: &str = "
INSERT INTO movies (user_id, title, year, rating, note, poster_url, imdb_id, country, favorite)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT(user_id, title) DO UPDATE SET
    year = excluded.year,
    rating = excluded.rating,
    note = excluded.note,
    poster_url = excluded.poster_url,
    imdb_id = excluded.imdb_id,
    country = excluded.country,
    favorite = excluded.favorite
";

const SQL_DELETE_MOVIE: &str = "DELETE FROM movies WHERE user_id = ?1 AND title = ?2";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SQL_CREATE_TABLES)?;
        Ok(Self { conn })
    }
}

fn row_to_movie(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        title: row.get(0)?,
        year: row.get(1)?,
        rating: row.get(2)?,
        note: row.get(3)?,
        poster_url: row.get(4)?,
        imdb_id: row.get(5)?,
        country: row.get(6)?,
        favorite: row.get(7)?,
    })
}

impl MovieStore for SqliteStore {
    fn users(&self) -> Result<Vec<User>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn ensure_user(&mut self, username: &str) -> Result<User, StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO users (username) VALUES (?1)",
            params![username],
        )?;
        let user = self.conn.query_row(
            "SELECT id, username FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                })
            },
        )?;
        Ok(user)
    }

    fn load(&self, user_id: i64) -> Result<Collection, StoreError> {
        let mut stmt = self.conn.prepare(SQL_SELECT_MOVIES)?;
        let mut movies = Collection::new();
        for movie in stmt.query_map(params![user_id], row_to_movie)? {
            let movie = movie?;
            movies.insert(movie.title.clone(), movie);
        }
        Ok(movies)
    }

    fn save(&mut self, user_id: i64, movies: &Collection) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM movies WHERE user_id = ?1", params![user_id])?;
        for movie in movies.values() {
            tx.execute(
                SQL_UPSERT_MOVIE,
                params![
                    user_id,
                    movie.title,
                    movie.year,
                    movie.rating,
                    movie.note,
                    movie.poster_url,
                    movie.imdb_id,
                    movie.country,
                    movie.favorite,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn find(&self, user_id: i64, title: &str) -> Result<Movie, StoreError> {
        self.conn
            .query_row(SQL_SELECT_MOVIE, params![user_id, title], row_to_movie)
            .optional()?
            .ok_or_else(|| StoreError::NotFound(title.to_string()))
    }

    fn upsert(&mut self, user_id: i64, movie: &Movie) -> Result<(), StoreError> {
        self.conn.execute(
            SQL_UPSERT_MOVIE,
            params![
                user_id,
                movie.title,
                movie.year,
                movie.rating,
                movie.note,
                movie.poster_url,
                movie.imdb_id,
                movie.country,
                movie.favorite,
            ],
        )?;
        Ok(())
    }

    fn delete(&mut self, user_id: i64, title: &str) -> Result<(), StoreError> {
        let affected = self.conn.execute(SQL_DELETE_MOVIE, params![user_id, title])?;
        if affected == 0 {
            return Err(StoreError::NotFound(title.to_string()));
        }
        Ok(())
    }
}
