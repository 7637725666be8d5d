//! The [`Store`] handle.
//!
//! `Store` bundles the open [`Database`] with the change-listener registry
//! and the id generator. All domain operations (user, product, order, cart
//! and session helpers) are implemented on `Store` in their own modules.
//!
//! The handle is deliberately `!Send + !Sync`: the storefront UI drives it
//! from a single task, compound read-modify-write operations are not atomic,
//! and exposing the store to concurrent callers would need an external
//! mutual-exclusion boundary.

use std::cell::Cell;
use std::path::Path;

use chrono::Utc;

use crate::database::Database;
use crate::error::Result;
use crate::events::{ListenerId, Listeners};

/// Handle to the local storefront database.
pub struct Store {
    pub(crate) db: Database,
    listeners: Listeners,
    last_id: Cell<i64>,
}

impl Store {
    /// Open (or create) the default application database.
    pub fn open() -> Result<Self> {
        Ok(Self::with_database(Database::new()?))
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        Ok(Self::with_database(Database::open_at(path)?))
    }

    fn with_database(db: Database) -> Self {
        Self {
            db,
            listeners: Listeners::default(),
            last_id: Cell::new(0),
        }
    }

    /// Return the underlying [`Database`].
    ///
    /// Callers should prefer the typed helpers, but direct slot access is
    /// occasionally needed for tooling and tests.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Register a callback invoked after every persisted mutation.
    pub fn add_listener(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    /// Unregister a previously added callback.
    pub fn remove_listener(&self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    /// Notify all listeners. Every mutating operation calls this exactly
    /// once, after its persistence write, before returning to the caller.
    pub(crate) fn notify(&self) {
        self.listeners.emit();
    }

    // ------------------------------------------------------------------
    // Id generation
    // ------------------------------------------------------------------

    /// Produce a fresh record id.
    ///
    /// Ids are the creation time in epoch milliseconds, rendered as a
    /// string. Successive calls within the same millisecond are bumped so
    /// ids stay unique within a process (the seeding path creates several
    /// records back to back).
    pub(crate) fn next_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_id.get() + 1);
        self.last_id.set(id);
        id.to_string()
    }
}
