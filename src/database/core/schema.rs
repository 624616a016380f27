//! Database schema management
//!
//! All tables of the overlay database are defined here. The schema is a
//! static, additive script: every statement is `IF NOT EXISTS`, so applying
//! it on each startup is safe and never touches existing rows.

use anyhow::{anyhow, Result};
use rusqlite::Connection;

/// Current schema version
/// Increment this when adding tables or columns
pub const SCHEMA_VERSION: u32 = 1;

/// Schema definitions for all tables in the overlay database
pub struct SchemaDefinitions;

impl SchemaDefinitions {
    /// SQL for creating the meta table (tracks schema version)
    pub const META_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS byteframes_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );
    "#;

    pub const CONFIGS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS configs (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
    "#;

    pub const WIDGETS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS widgets (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            js_code TEXT NOT NULL DEFAULT '',
            css_code TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
    "#;

    /// Placement of a widget inside a config
    pub const CONFIG_WIDGETS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS config_widgets (
            config_id TEXT NOT NULL REFERENCES configs(id) ON DELETE CASCADE,
            widget_id TEXT NOT NULL REFERENCES widgets(id) ON DELETE CASCADE,
            enabled INTEGER NOT NULL DEFAULT 1,
            z_index INTEGER NOT NULL DEFAULT 0,
            position_x INTEGER NOT NULL DEFAULT 0,
            position_y INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (config_id, widget_id)
        );
    "#;

    pub const WIDGET_RUNTIME_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS widget_runtime (
            widget_id TEXT PRIMARY KEY REFERENCES widgets(id) ON DELETE CASCADE,
            is_mounted INTEGER NOT NULL DEFAULT 0,
            mounted_at INTEGER NOT NULL DEFAULT 0
        );
    "#;

    pub const SETTINGS_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
    "#;

    pub const INDEXES: &'static [&'static str] = &[
        "CREATE INDEX IF NOT EXISTS idx_configs_created_at ON configs(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_widgets_created_at ON widgets(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_config_widgets_widget_id ON config_widgets(widget_id)",
    ];

    /// Tables that must exist for the schema to be considered intact
    pub const REQUIRED_TABLES: &'static [&'static str] = &[
        "byteframes_meta",
        "configs",
        "widgets",
        "config_widgets",
        "widget_runtime",
        "settings",
    ];
}

/// Schema manager for the overlay database
///
/// Handles schema initialization, version checking and reset.
pub struct SchemaManager<'a> {
    conn: &'a Connection,
}

impl<'a> SchemaManager<'a> {
    /// Create a new schema manager for the given connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Initialize the database schema
    ///
    /// Creates all tables and indexes that don't exist yet and records the
    /// schema version. Safe to call on every startup.
    pub fn initialize(&self) -> Result<()> {
        self.conn
            .execute(SchemaDefinitions::META_TABLE, [])
            .map_err(|e| anyhow!("Failed to create meta table: {}", e))?;

        let tables = [
            ("configs", SchemaDefinitions::CONFIGS_TABLE),
            ("widgets", SchemaDefinitions::WIDGETS_TABLE),
            ("config_widgets", SchemaDefinitions::CONFIG_WIDGETS_TABLE),
            ("widget_runtime", SchemaDefinitions::WIDGET_RUNTIME_TABLE),
            ("settings", SchemaDefinitions::SETTINGS_TABLE),
        ];
        for (name, sql) in tables {
            self.conn
                .execute(sql, [])
                .map_err(|e| anyhow!("Failed to create {} table: {}", name, e))?;
        }

        for index_sql in SchemaDefinitions::INDEXES {
            self.conn
                .execute(index_sql, [])
                .map_err(|e| anyhow!("Failed to create index: {}", e))?;
        }

        self.set_meta("schema_version", &SCHEMA_VERSION.to_string())?;

        Ok(())
    }

    /// Check the current schema status
    pub fn check_status(&self) -> Result<SchemaStatus> {
        let meta_exists: i32 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='byteframes_meta'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if meta_exists == 0 {
            return Ok(SchemaStatus::NotInitialized);
        }

        let current_version = self.get_schema_version()?;

        if current_version == SCHEMA_VERSION {
            if self.verify_integrity()? {
                Ok(SchemaStatus::Current)
            } else {
                Ok(SchemaStatus::Corrupted)
            }
        } else if current_version < SCHEMA_VERSION {
            Ok(SchemaStatus::NeedsMigration {
                from: current_version,
                to: SCHEMA_VERSION,
            })
        } else {
            // Written by a newer build
            Ok(SchemaStatus::Incompatible {
                database_version: current_version,
                required_version: SCHEMA_VERSION,
            })
        }
    }

    /// Get the current schema version from the database
    pub fn get_schema_version(&self) -> Result<u32> {
        // A fresh database has no meta table yet
        let version = self
            .get_meta("schema_version")
            .ok()
            .flatten()
            .unwrap_or_else(|| "0".to_string());

        version
            .parse()
            .map_err(|e| anyhow!("Invalid schema version: {}", e))
    }

    fn verify_integrity(&self) -> Result<bool> {
        for table in SchemaDefinitions::REQUIRED_TABLES {
            let exists: i32 = self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap_or(0);

            if exists == 0 {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Set a metadata value
    pub fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO byteframes_meta (key, value, updated_at) VALUES (?1, ?2, strftime('%s', 'now'))",
                [key, value],
            )
            .map_err(|e| anyhow!("Failed to set meta value: {}", e))?;
        Ok(())
    }

    /// Get a metadata value
    pub fn get_meta(&self, key: &str) -> Result<Option<String>> {
        let result: Result<String, _> = self.conn.query_row(
            "SELECT value FROM byteframes_meta WHERE key = ?1",
            [key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(anyhow!("Failed to get meta value: {}", e)),
        }
    }

    /// Reset the database by dropping all tables
    pub fn reset(&self) -> Result<()> {
        // Children first so the foreign keys never dangle
        for table in [
            "config_widgets",
            "widget_runtime",
            "widgets",
            "configs",
            "settings",
            "byteframes_meta",
        ] {
            self.conn
                .execute(&format!("DROP TABLE IF EXISTS {}", table), [])
                .map_err(|e| anyhow!("Failed to drop {} table: {}", table, e))?;
        }

        Ok(())
    }
}

/// Status of the database schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Database is not initialized (fresh database)
    NotInitialized,

    /// Schema is current and valid
    Current,

    /// Schema was written by an older build
    NeedsMigration { from: u32, to: u32 },

    /// Database is from a newer version (incompatible)
    Incompatible {
        database_version: u32,
        required_version: u32,
    },

    /// Schema is missing tables
    Corrupted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn create_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("PRAGMA foreign_keys=ON", []).unwrap();
        conn
    }

    #[test]
    fn test_schema_not_initialized() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::NotInitialized
        );
    }

    #[test]
    fn test_schema_initialize_is_idempotent() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES ('theme', 'dark', 1)",
            [],
        )
        .unwrap();
        manager.initialize().unwrap();

        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Current);
        let value: String = conn
            .query_row("SELECT value FROM settings WHERE key = 'theme'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, "dark");
    }

    #[test]
    fn test_schema_version() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();

        assert_eq!(manager.get_schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_missing_table_is_corrupted() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();
        conn.execute("DROP TABLE settings", []).unwrap();

        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Corrupted);
    }

    #[test]
    fn test_newer_version_is_incompatible() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();
        manager
            .set_meta("schema_version", &(SCHEMA_VERSION + 1).to_string())
            .unwrap();

        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::Incompatible {
                database_version: SCHEMA_VERSION + 1,
                required_version: SCHEMA_VERSION,
            }
        );
    }

    #[test]
    fn test_meta_operations() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();

        manager.set_meta("test_key", "test_value").unwrap();
        let value = manager.get_meta("test_key").unwrap();
        assert_eq!(value, Some("test_value".to_string()));

        let missing = manager.get_meta("nonexistent").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_schema_reset() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();
        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Current);

        manager.reset().unwrap();
        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::NotInitialized
        );
    }
}
