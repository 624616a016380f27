//! Database module
//!
//! All persistent state of byteframes lives in one SQLite file, organized as:
//!
//! ```text
//! database/
//! ├── core/           # Foundation
//! │   ├── connection  # SQLite DatabaseConn wrapper
//! │   └── schema      # Schema definitions and management
//! │
//! └── overlay/        # Persistent overlay storage
//!     ├── configs     # Scenes and the active flag
//!     ├── widgets     # Widget definitions (JS/CSS)
//!     ├── placements  # Config <-> widget links
//!     ├── runtime     # Widget mount state
//!     ├── settings    # Key/value preferences
//!     └── seed        # Default scene for an empty database
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use byteframes::database::OverlayDatabase;
//!
//! let db = OverlayDatabase::open("/home/me/.byteframes/byteframes.db")?;
//! db.seed_default_scene()?;
//!
//! let scene = db.configs().create("Streaming")?;
//! let widget = db.widgets().create("Clock", js, css)?;
//! db.placements().add(&scene.id, &widget.id, true, 0)?;
//! db.configs().set_active(&scene.id, true)?;
//! ```

pub mod core;
pub mod overlay;

pub use core::{DatabaseConn, SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION};

pub use overlay::{
    seed_default_scene, Config, ConfigRepository, ConfigWidget, OverlayDatabase,
    PlacementRepository, RuntimeRepository, SeededScene, Setting, SettingsRepository, Widget,
    WidgetRepository, WidgetRuntime, WidgetWithConfig, DEFAULT_DATABASE_FILE,
};

/// Ensure the data directory exists
pub fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))
}
