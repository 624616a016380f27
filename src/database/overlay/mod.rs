//! Overlay database storage
//!
//! This module provides the persistent database behind the overlay shell:
//! - Configs (scenes) and their active flag
//! - Widget definitions (JS/CSS)
//! - Placements of widgets inside configs
//! - Widget runtime mount state
//! - Flat key/value settings

mod configs;
mod ids;
mod placements;
mod runtime;
mod seed;
mod settings;
mod types;
mod widgets;

pub use configs::ConfigRepository;
pub use ids::{
    generate_id, new_config_id, new_widget_id, unix_now, CONFIG_ID_PREFIX, WIDGET_ID_PREFIX,
};
pub use placements::PlacementRepository;
pub use runtime::RuntimeRepository;
pub use seed::{
    seed_default_scene, SeededScene, DEFAULT_CONFIG_NAME, DEFAULT_WIDGET_CSS, DEFAULT_WIDGET_JS,
    DEFAULT_WIDGET_NAME,
};
pub use settings::SettingsRepository;
pub use types::{Config, ConfigWidget, Setting, Widget, WidgetRuntime, WidgetWithConfig};
pub use widgets::WidgetRepository;

use crate::database::core::{DatabaseConn, SchemaManager, SchemaStatus};
use anyhow::{anyhow, Result};
use tracing::info;

/// File name of the overlay database inside the data directory
pub const DEFAULT_DATABASE_FILE: &str = "byteframes.db";

/// Main overlay database (SQLite backend)
///
/// `OverlayDatabase` owns the single connection and hands out repositories
/// that borrow it.
pub struct OverlayDatabase {
    db: DatabaseConn,
}

impl OverlayDatabase {
    /// Open the overlay database at the specified path
    ///
    /// The file is created if missing. The schema script is re-applied
    /// whenever tables are missing or the recorded version is older; rows
    /// are never dropped. A database written by a newer build is refused.
    pub fn open(path: &str) -> Result<Self> {
        let db = DatabaseConn::open_path(path)?;
        Self::prepare_schema(&db)?;
        Ok(Self { db })
    }

    /// Create an in-memory overlay database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let db = DatabaseConn::open_in_memory()?;
        SchemaManager::new(&db.conn).initialize()?;
        Ok(Self { db })
    }

    fn prepare_schema(db: &DatabaseConn) -> Result<()> {
        let schema = SchemaManager::new(&db.conn);

        match schema.check_status()? {
            SchemaStatus::Current => {
                info!("Overlay database schema is current");
            }
            SchemaStatus::NotInitialized => {
                info!("Initializing overlay database schema");
                schema.initialize()?;
            }
            SchemaStatus::NeedsMigration { from, to } => {
                info!("Upgrading overlay database schema from v{} to v{}", from, to);
                schema.initialize()?;
            }
            SchemaStatus::Corrupted => {
                info!("Overlay database is missing tables, re-applying schema");
                schema.initialize()?;
            }
            SchemaStatus::Incompatible {
                database_version,
                required_version,
            } => {
                return Err(anyhow!(
                    "Overlay database schema v{} is newer than supported v{}",
                    database_version,
                    required_version
                ));
            }
        }

        Ok(())
    }

    pub fn configs(&self) -> ConfigRepository<'_> {
        ConfigRepository::new(&self.db.conn)
    }

    pub fn widgets(&self) -> WidgetRepository<'_> {
        WidgetRepository::new(&self.db.conn)
    }

    pub fn placements(&self) -> PlacementRepository<'_> {
        PlacementRepository::new(&self.db.conn)
    }

    pub fn runtime(&self) -> RuntimeRepository<'_> {
        RuntimeRepository::new(&self.db.conn)
    }

    pub fn settings(&self) -> SettingsRepository<'_> {
        SettingsRepository::new(&self.db.conn)
    }

    /// Get the underlying database connection (for advanced queries)
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.db.conn
    }

    /// Seed the default scene into an empty database
    ///
    /// Returns `true` if the scene was created.
    pub fn seed_default_scene(&self) -> Result<bool> {
        match seed_default_scene(&self.db.conn)? {
            Some(scene) => {
                info!(
                    "Created default config {} with clock widget {}",
                    scene.config_id, scene.widget_id
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Row counts per table, for diagnostics
    pub fn table_counts(&self) -> Result<Vec<(&'static str, u64)>> {
        ["configs", "widgets", "config_widgets", "widget_runtime", "settings"]
            .into_iter()
            .map(|table| -> Result<(&'static str, u64)> {
                Ok((table, self.db.table_count(table)?))
            })
            .collect()
    }

    /// Drop every table and re-apply the schema
    pub fn reset(&self) -> Result<()> {
        let schema = SchemaManager::new(&self.db.conn);
        schema.reset()?;
        schema.initialize()
    }
}
