//! Config (scene) repository

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::ids::{new_config_id, unix_now};
use super::types::Config;

const CONFIG_COLUMNS: &str = "id, name, is_active, created_at, updated_at";

/// Repository for config operations
pub struct ConfigRepository<'a> {
    conn: &'a Connection,
}

fn config_from_row(row: &Row<'_>) -> rusqlite::Result<Config> {
    Ok(Config {
        id: row.get(0)?,
        name: row.get(1)?,
        is_active: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

impl<'a> ConfigRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM configs", [], |row| row.get(0))
            .map_err(|e| anyhow!("Failed to count configs: {}", e))?;
        Ok(count)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }

    /// All configs, newest first
    ///
    /// Creation time has one-second resolution, so the id (which embeds
    /// nanoseconds) breaks ties.
    pub fn list(&self) -> Result<Vec<Config>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM configs ORDER BY created_at DESC, id DESC",
                CONFIG_COLUMNS
            ))
            .map_err(|e| anyhow!("Failed to prepare config query: {}", e))?;

        let configs = stmt
            .query_map([], config_from_row)
            .map_err(|e| anyhow!("Failed to list configs: {}", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| anyhow!("Failed to read config row: {}", e))?;

        Ok(configs)
    }

    pub fn get(&self, id: &str) -> Result<Option<Config>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM configs WHERE id = ?1", CONFIG_COLUMNS),
                [id],
                config_from_row,
            )
            .optional()
            .map_err(|e| anyhow!("Failed to get config '{}': {}", id, e))
    }

    /// The currently active config, if any
    pub fn active(&self) -> Result<Option<Config>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM configs WHERE is_active = 1 ORDER BY updated_at DESC LIMIT 1",
                    CONFIG_COLUMNS
                ),
                [],
                config_from_row,
            )
            .optional()
            .map_err(|e| anyhow!("Failed to get active config: {}", e))
    }

    /// Create an inactive config
    pub fn create(&self, name: &str) -> Result<Config> {
        let now = unix_now();
        let config = Config {
            id: new_config_id(),
            name: name.to_string(),
            is_active: false,
            created_at: now,
            updated_at: now,
        };

        self.conn
            .execute(
                "INSERT INTO configs (id, name, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    config.id,
                    config.name,
                    config.is_active,
                    config.created_at,
                    config.updated_at
                ],
            )
            .map_err(|e| anyhow!("Failed to create config: {}", e))?;

        Ok(config)
    }

    /// Mark a config active or inactive
    ///
    /// Activating one config deactivates every other config in the same
    /// transaction, so at most one config is ever active.
    pub fn set_active(&self, id: &str, active: bool) -> Result<()> {
        let now = unix_now();
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| anyhow!("Failed to begin transaction: {}", e))?;

        if active {
            tx.execute("UPDATE configs SET is_active = 0 WHERE is_active != 0", [])
                .map_err(|e| anyhow!("Failed to deactivate configs: {}", e))?;
        }

        tx.execute(
            "UPDATE configs SET is_active = ?1, updated_at = ?2 WHERE id = ?3",
            params![active, now, id],
        )
        .map_err(|e| anyhow!("Failed to update config '{}': {}", id, e))?;

        tx.commit()
            .map_err(|e| anyhow!("Failed to commit config activation: {}", e))?;
        Ok(())
    }

    pub fn rename(&self, id: &str, name: &str) -> Result<()> {
        self.conn
            .execute(
                "UPDATE configs SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, unix_now(), id],
            )
            .map_err(|e| anyhow!("Failed to rename config '{}': {}", id, e))?;
        Ok(())
    }

    /// Delete a config; its placements go with it
    pub fn delete(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM configs WHERE id = ?1", [id])
            .map_err(|e| anyhow!("Failed to delete config '{}': {}", id, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::database::OverlayDatabase;

    #[test]
    fn test_create_then_list_newest_first() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        let first = db.configs().create("First").unwrap();
        let second = db.configs().create("Second").unwrap();

        let configs = db.configs().list().unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].id, second.id);
        assert_eq!(configs[1].id, first.id);
        assert!(!configs[0].is_active);
    }

    #[test]
    fn test_set_active_is_exclusive() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        let repo = db.configs();
        let a = repo.create("A").unwrap();
        let b = repo.create("B").unwrap();
        let c = repo.create("C").unwrap();

        repo.set_active(&a.id, true).unwrap();
        repo.set_active(&c.id, true).unwrap();

        let active: Vec<_> = repo
            .list()
            .unwrap()
            .into_iter()
            .filter(|c| c.is_active)
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, c.id);
        assert_eq!(repo.active().unwrap().map(|c| c.id), Some(c.id.clone()));

        repo.set_active(&c.id, false).unwrap();
        assert!(repo.active().unwrap().is_none());
        assert!(!repo.get(&b.id).unwrap().unwrap().is_active);
    }

    #[test]
    fn test_rename_and_delete() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        let repo = db.configs();
        let config = repo.create("Old").unwrap();

        repo.rename(&config.id, "New").unwrap();
        assert_eq!(repo.get(&config.id).unwrap().unwrap().name, "New");

        repo.delete(&config.id).unwrap();
        assert!(repo.get(&config.id).unwrap().is_none());
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_missing_id_is_not_an_error() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        assert!(db.configs().set_active("cfg_missing", true).is_ok());
        assert!(db.configs().delete("cfg_missing").is_ok());
    }
}
