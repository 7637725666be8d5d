//! v001 -- Initial schema creation.
//!
//! Creates the single `slots` table. Each row maps one of the fixed storage
//! keys (`users`, `products`, `orders`, `cart`, `currentUser`) to the JSON
//! blob holding that collection or value.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS slots (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL                -- JSON blob
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
