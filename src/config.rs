use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::database::DEFAULT_DATABASE_FILE;

pub struct ByteframesConfig {
    /// Path to the directory holding the overlay database
    pub data_dir: String,

    /// File name of the SQLite database inside `data_dir`
    pub database_file: String,
}

const EMPTY_CONFIG: &str = r#"### byteframes configuration file

### directory holding the overlay database
# data_dir = "~/.byteframes"

### database file name inside data_dir
# database_file = "byteframes.db"
"#;

impl Default for ByteframesConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.byteframes", home_dir),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
        }
    }
}

impl ByteframesConfig {
    /// Load the configuration
    ///
    /// Reads the TOML file at `path` (default `$HOME/.byteframes/byteframes.toml`),
    /// writing a commented template first if it does not exist, then applies
    /// `BYTEFRAMES_*` environment overrides.
    pub fn new(path: &Option<String>) -> Result<ByteframesConfig> {
        let mut builder = Config::builder();

        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let byteframes_dir = format!("{}/.byteframes", home_dir.as_str());

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(byteframes_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create byteframes directory: {}", e))?;
                let p = format!("{}/byteframes.toml", byteframes_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // e.g. `BYTEFRAMES_DATA_DIR=/tmp/overlay byteframes scene list`
        builder = builder.add_source(config::Environment::with_prefix("BYTEFRAMES"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_map(&config, &byteframes_dir)
    }

    fn from_map(config: &HashMap<String, String>, default_dir: &str) -> Result<ByteframesConfig> {
        let data_dir = match config.get("data_dir") {
            Some(p) => expand_home(p),
            None => default_dir.to_string(),
        };
        std::fs::create_dir_all(data_dir.as_str())
            .map_err(|e| anyhow!("Unable to create data directory '{}': {}", data_dir, e))?;

        let database_file = config
            .get("database_file")
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_DATABASE_FILE.to_string());

        Ok(ByteframesConfig {
            data_dir,
            database_file,
        })
    }

    /// Get the path to the SQLite database file
    pub fn database_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/{}", data_dir, self.database_file)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("Config File:        {}", Self::config_file_path()),
            format!("Data Directory:     {}", self.data_dir),
            format!("Database Path:      {}", self.database_path()),
        ]
        .join("\n")
    }

    /// Get the default config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.byteframes/byteframes.toml", home_dir)
    }
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Some(rest), Some(home)) => format!("{}{}", home.to_string_lossy(), rest),
        _ => path.to_string(),
    }
}

/// Information about the SQLite database
#[derive(Debug, Serialize, Clone)]
pub struct SqliteDatabaseInfo {
    pub path: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub schema_initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_config: Option<String>,
    pub table_counts: HashMap<String, u64>,
}

/// Inspect the database file without creating or modifying it
///
/// The file is opened read-only, so its journal mode and header are left
/// as they are.
pub fn get_sqlite_info(config: &ByteframesConfig) -> SqliteDatabaseInfo {
    use crate::database::overlay::ConfigRepository;
    use crate::database::{
        DatabaseConn, SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION,
    };

    let path = config.database_path();
    let exists = Path::new(&path).exists();
    let mut info = SqliteDatabaseInfo {
        size_bytes: if exists {
            std::fs::metadata(&path).ok().map(|m| m.len())
        } else {
            None
        },
        path,
        exists,
        schema_initialized: false,
        schema_version: None,
        active_config: None,
        table_counts: HashMap::new(),
    };

    if !info.exists {
        return info;
    }

    let Ok(db) = DatabaseConn::open_read_only(&info.path) else {
        return info;
    };

    let status = SchemaManager::new(&db.conn).check_status();
    let (initialized, version) = match status {
        Ok(SchemaStatus::Current) => (true, Some(SCHEMA_VERSION)),
        Ok(SchemaStatus::NeedsMigration { from, .. }) => (true, Some(from)),
        Ok(SchemaStatus::Incompatible {
            database_version, ..
        }) => (true, Some(database_version)),
        Ok(SchemaStatus::NotInitialized) | Ok(SchemaStatus::Corrupted) | Err(_) => (false, None),
    };
    info.schema_initialized = initialized;
    info.schema_version = version;

    // Only read rows from a schema this build understands
    if status.ok() == Some(SchemaStatus::Current) {
        info.active_config = ConfigRepository::new(&db.conn)
            .active()
            .ok()
            .flatten()
            .map(|c| c.name);
        for table in SchemaDefinitions::REQUIRED_TABLES {
            if *table == "byteframes_meta" {
                continue;
            }
            if let Ok(count) = db.table_count(table) {
                info.table_counts.insert(table.to_string(), count);
            }
        }
    }

    info
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ByteframesConfig::default();
        assert!(config.data_dir.ends_with("/.byteframes"));
        assert_eq!(config.database_file, "byteframes.db");
    }

    #[test]
    fn test_database_path() {
        let config = ByteframesConfig {
            data_dir: "/tmp/overlay/".to_string(),
            database_file: "scenes.db".to_string(),
        };
        assert_eq!(config.database_path(), "/tmp/overlay/scenes.db");
    }

    #[test]
    fn test_from_map() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data").to_string_lossy().to_string();
        let map = HashMap::from([
            ("data_dir".to_string(), data_dir.clone()),
            ("database_file".to_string(), "custom.db".to_string()),
        ]);

        let config = ByteframesConfig::from_map(&map, "unused").unwrap();
        assert_eq!(config.data_dir, data_dir);
        assert_eq!(config.database_file, "custom.db");
        assert!(Path::new(&data_dir).is_dir());
    }

    #[test]
    fn test_from_map_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let default_dir = dir.path().to_string_lossy().to_string();

        let config = ByteframesConfig::from_map(&HashMap::new(), &default_dir).unwrap();
        assert_eq!(config.data_dir, default_dir);
        assert_eq!(config.database_file, DEFAULT_DATABASE_FILE);
    }

    #[test]
    fn test_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("overlay").to_string_lossy().to_string();
        let config_path = dir.path().join("byteframes.toml");
        std::fs::write(
            &config_path,
            format!("data_dir = \"{}\"\ndatabase_file = \"test.db\"\n", data_dir),
        )
        .unwrap();

        let config =
            ByteframesConfig::new(&Some(config_path.to_string_lossy().to_string())).unwrap();
        assert_eq!(config.database_path(), format!("{}/test.db", data_dir));
    }

    #[test]
    fn test_sqlite_info_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ByteframesConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            database_file: "absent.db".to_string(),
        };
        let info = get_sqlite_info(&config);
        assert!(!info.exists);
        assert!(!info.schema_initialized);
        assert!(!Path::new(&config.database_path()).exists());
    }

    #[test]
    fn test_sqlite_info_seeded_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = ByteframesConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            database_file: DEFAULT_DATABASE_FILE.to_string(),
        };
        {
            let db = crate::database::OverlayDatabase::open(&config.database_path()).unwrap();
            db.seed_default_scene().unwrap();
        }

        let info = get_sqlite_info(&config);
        assert!(info.exists);
        assert!(info.schema_initialized);
        assert_eq!(info.schema_version, Some(crate::database::SCHEMA_VERSION));
        assert_eq!(info.active_config.as_deref(), Some("Default Scene"));
        assert_eq!(info.table_counts.get("configs"), Some(&1));
        assert_eq!(info.table_counts.get("widget_runtime"), Some(&1));
        assert!(!info.table_counts.contains_key("byteframes_meta"));
    }

    #[test]
    fn test_sqlite_info_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let config = ByteframesConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            database_file: "rollback.db".to_string(),
        };
        let path = config.database_path();
        {
            let conn = rusqlite::Connection::open(&path).unwrap();
            crate::database::SchemaManager::new(&conn)
                .initialize()
                .unwrap();
        }

        let info = get_sqlite_info(&config);
        assert!(info.schema_initialized);
        assert_eq!(info.table_counts.get("configs"), Some(&0));

        assert!(!Path::new(&format!("{}-wal", path)).exists());
        assert!(!Path::new(&format!("{}-shm", path)).exists());
        let conn = rusqlite::Connection::open(&path).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode, "delete");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
