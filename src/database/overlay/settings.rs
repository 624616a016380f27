//! Flat key/value settings repository

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::ids::unix_now;
use super::types::Setting;

pub struct SettingsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<Setting>> {
        self.conn
            .query_row(
                "SELECT key, value, updated_at FROM settings WHERE key = ?1",
                [key],
                |row| {
                    Ok(Setting {
                        key: row.get(0)?,
                        value: row.get(1)?,
                        updated_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| anyhow!("Failed to get setting '{}': {}", key, e))
    }

    /// Upsert a value, stamping it with the current time
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_at(key, value, unix_now())
    }

    pub(crate) fn set_at(&self, key: &str, value: &str, updated_at: i64) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO settings (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, updated_at],
            )
            .map_err(|e| anyhow!("Failed to set setting '{}': {}", key, e))?;
        Ok(())
    }

    /// All settings, ordered by key
    pub fn list(&self) -> Result<Vec<Setting>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value, updated_at FROM settings ORDER BY key ASC")
            .map_err(|e| anyhow!("Failed to prepare settings query: {}", e))?;

        let settings = stmt
            .query_map([], |row| {
                Ok(Setting {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            })
            .map_err(|e| anyhow!("Failed to list settings: {}", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| anyhow!("Failed to read setting row: {}", e))?;

        Ok(settings)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key = ?1", [key])
            .map_err(|e| anyhow!("Failed to delete setting '{}': {}", key, e))?;
        Ok(())
    }
}
