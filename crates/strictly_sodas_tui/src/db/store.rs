//! Key-value store backed by a SQLite file.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use strictly_sodas::{KeyValueStore, StoreError};
use tracing::{debug, info, instrument};

use crate::db::{DbError, KvEntry, NewKvEntry, schema};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Persistent [`KeyValueStore`] in a SQLite database.
///
/// A connection is opened per call, so the store is cheap to clone and
/// holds no handle between operations. The path must name a file; an
/// in-memory database would vanish between calls.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, DbError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(path = %store.db_path, migrations = applied.len(), "Store opened");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Reads one entry. Returns `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn read(&self, name: &str) -> Result<Option<KvEntry>, DbError> {
        let mut conn = self.connection()?;
        let entry = schema::kv_entries::table
            .filter(schema::kv_entries::name.eq(name))
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()?;
        debug!(found = entry.is_some(), "Entry read");
        Ok(entry)
    }

    /// Writes one entry, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, value), fields(bytes = value.len()))]
    pub fn write(&self, name: &str, value: &str) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let entry = NewKvEntry::new(name, value, Utc::now().naive_utc());
        diesel::replace_into(schema::kv_entries::table)
            .values(&entry)
            .execute(&mut conn)?;
        debug!("Entry written");
        Ok(())
    }

    /// All entries, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entries(&self) -> Result<Vec<KvEntry>, DbError> {
        let mut conn = self.connection()?;
        let entries = schema::kv_entries::table
            .order(schema::kv_entries::name.asc())
            .select(KvEntry::as_select())
            .load(&mut conn)?;
        debug!(count = entries.len(), "Entries loaded");
        Ok(entries)
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entry = self.read(key)?;
        Ok(entry.map(|e| e.value().clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write(key, value)?;
        Ok(())
    }
}
