//! Garden snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load and save the whole garden as one named JSON blob.
//! - Keep SQL and serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the garden before persisting it.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Saves are last-write-wins over a single key.

use crate::db::DbError;
use crate::model::garden::{GardenState, GardenValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key of the garden snapshot blob.
pub const GARDEN_STORAGE_KEY: &str = "mindful-grove-storage";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "garden snapshot encoding failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted garden data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

impl From<GardenValidationError> for RepoError {
    fn from(value: GardenValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Repository interface for the garden snapshot.
pub trait GardenRepository {
    /// Returns the stored garden, or `None` on first launch.
    fn load_garden(&self) -> RepoResult<Option<GardenState>>;
    /// Replaces the stored garden with `garden`.
    fn save_garden(&self, garden: &GardenState) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
///
/// Owns its connection so the store holding it can live for the whole
/// process.
pub struct SqliteGardenRepository {
    conn: Connection,
}

impl SqliteGardenRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Creates a repository after checking the snapshot table exists.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::InvalidData(
                "kv_store table missing; open the database through open_db".to_string(),
            ));
        }
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl GardenRepository for SqliteGardenRepository {
    fn load_garden(&self) -> RepoResult<Option<GardenState>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [GARDEN_STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        let garden: GardenState = serde_json::from_str(&raw)
            .map_err(|err| RepoError::InvalidData(format!("{GARDEN_STORAGE_KEY}: {err}")))?;
        garden.validate()?;
        Ok(Some(garden))
    }

    fn save_garden(&self, garden: &GardenState) -> RepoResult<()> {
        garden.validate()?;
        let encoded = serde_json::to_string(garden)?;

        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![GARDEN_STORAGE_KEY, encoded],
        )?;
        Ok(())
    }
}
