//! The generic collection adapter.
//!
//! Every collection is one row in the `collections` table, its value a
//! JSON array. A missing row and malformed JSON both read as an empty
//! sequence: the store fails soft and never surfaces a parse error to
//! callers.

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Read a collection, deserializing each record as `T`.
    ///
    /// Returns an empty vector when the key is absent or the stored text
    /// does not parse; the latter is logged at `warn`.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let stored: Option<String> = self
            .conn()
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(text) = stored else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&text) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed collection, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Serialize `records` and upsert the collection row.
    ///
    /// An empty slice writes the literal `[]`, never deletes the row, so
    /// a drained collection stays an empty sequence rather than becoming
    /// absent.
    pub fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.conn().execute(
            "INSERT INTO collections (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, json],
        )?;
        Ok(())
    }

    /// Raw stored text of a collection, if any. Mainly for tests and
    /// diagnostics.
    pub fn raw_collection(&self, key: &str) -> Result<Option<String>> {
        let stored = self
            .conn()
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    struct Item {
        id: i64,
        label: String,
    }

    fn open_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_dir, db) = open_db();
        let items = vec![
            Item { id: 1, label: "a".into() },
            Item { id: 2, label: "b".into() },
        ];

        db.write_collection("things", &items).unwrap();
        let back: Vec<Item> = db.read_collection("things").unwrap();

        assert_eq!(back, items);
    }

    #[test]
    fn missing_key_reads_empty() {
        let (_dir, db) = open_db();
        let back: Vec<Item> = db.read_collection("nope").unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn malformed_value_reads_empty() {
        let (_dir, db) = open_db();
        db.conn()
            .execute(
                "INSERT INTO collections (key, value) VALUES ('broken', '{not json')",
                [],
            )
            .unwrap();

        let back: Vec<Item> = db.read_collection("broken").unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn empty_slice_persists_as_empty_array() {
        let (_dir, db) = open_db();
        db.write_collection::<Item>("things", &[]).unwrap();
        assert_eq!(db.raw_collection("things").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn overwrite_replaces_previous_value() {
        let (_dir, db) = open_db();
        db.write_collection("things", &[Item { id: 1, label: "a".into() }])
            .unwrap();
        db.write_collection("things", &[Item { id: 2, label: "b".into() }])
            .unwrap();

        let back: Vec<Item> = db.read_collection("things").unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].id, 2);
    }
}
