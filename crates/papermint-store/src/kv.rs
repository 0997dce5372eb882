//! Key-value primitives on top of the `kv` table.
//!
//! The typed helpers in [`crate::ledger`] and [`crate::users`] are built on
//! these; callers outside the store crate normally never touch raw keys.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Read the value stored under `key`, if any.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the value stored under `key`.
    pub fn kv_put(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete the entry under `key`.  Returns `true` if a row was deleted.
    pub fn kv_delete(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    #[test]
    fn test_get_put_delete() {
        let (_dir, db) = open();

        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_put("greeting", "hello").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().as_deref(), Some("hello"));

        db.kv_put("greeting", "goodbye").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().as_deref(), Some("goodbye"));

        assert!(db.kv_delete("greeting").unwrap());
        assert!(!db.kv_delete("greeting").unwrap());
        assert_eq!(db.kv_get("greeting").unwrap(), None);
    }
}
