//! v001 -- Initial schema creation.
//!
//! The entire portal state lives in one key-value table: one row per
//! named collection, the value being a JSON array of records. This
//! mirrors the localStorage layout of the portal's web build, so stored
//! data imports as-is.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Collections
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS collections (
    key   TEXT PRIMARY KEY NOT NULL,   -- collection name, e.g. 'userReports'
    value TEXT NOT NULL                -- JSON array of records
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
