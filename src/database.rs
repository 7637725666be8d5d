//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation. All domain data lives in a
//! single `slots` table mapping a fixed string key to a JSON blob — the same
//! key/value layout the storefront UI has always persisted, so an existing
//! on-device database remains readable.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Slot key for the persisted [`crate::models::User`] collection.
pub const USERS_KEY: &str = "users";
/// Slot key for the persisted [`crate::models::Product`] collection.
pub const PRODUCTS_KEY: &str = "products";
/// Slot key for the persisted [`crate::models::Order`] collection.
pub const ORDERS_KEY: &str = "orders";
/// Slot key for the persisted [`crate::models::CartItem`] collection.
pub const CART_KEY: &str = "cart";
/// Slot key for the single current-session user.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/tienda/tienda.db`
    /// - macOS:   `~/Library/Application Support/com.tienda.tienda/tienda.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\tienda\tienda\data\tienda.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "tienda", "tienda").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("tienda.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    // ------------------------------------------------------------------
    // Slot access
    // ------------------------------------------------------------------

    /// Read and deserialize the blob stored under `key`, or `None` when the
    /// slot has never been written (or has been deleted).
    pub fn read_slot<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match blob {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and write it under `key`, replacing any previous
    /// blob.
    pub fn write_slot<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, json],
        )?;
        Ok(())
    }

    /// Delete the blob stored under `key`. Returns `true` if a slot was
    /// removed.
    pub fn delete_slot(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM slots WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    /// Read a collection slot, treating an absent slot as an empty
    /// collection.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.read_slot(key)?.unwrap_or_default())
    }
}
