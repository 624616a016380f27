#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Byteframes - data layer for a desktop widget overlay
//!
//! Byteframes persists everything the overlay shell needs between sessions
//! in a single embedded SQLite file:
//!
//! - **configs** (scenes), at most one of them active
//! - **widgets**, reusable JS/CSS overlay element definitions
//! - **placements** of widgets inside configs (enabled flag, z-index, position)
//! - **runtime** mount state per widget, reported by the shell
//! - **settings**, a flat key/value store
//!
//! # Architecture
//!
//! - **[`database`]**: SQLite connection, schema and repositories
//!   - `core`: `DatabaseConn` wrapper and `SchemaManager`
//!   - `overlay`: `OverlayDatabase` and one repository per table
//! - **[`app`]**: `ByteframesApp`, the function-call surface. Each method
//!   returns a JSON string: the result, `{"success": true}`, or
//!   `{"error": "..."}`.
//! - **[`config`]**: configuration file and environment handling
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use byteframes::{ByteframesApp, ByteframesConfig};
//!
//! let config = ByteframesConfig::new(&None)?;
//! let app = ByteframesApp::startup(&config)?;
//!
//! // `[{"id":"cfg_...","name":"Default Scene","is_active":1,...}]`
//! println!("{}", app.get_configs());
//!
//! let scene = app.create_config("Streaming");
//! app.set_setting("obs_url", "ws://localhost:4455");
//! ```
//!
//! ## Typed access
//!
//! ```rust,ignore
//! use byteframes::database::OverlayDatabase;
//!
//! let db = OverlayDatabase::open_in_memory()?;
//! let widget = db.widgets().create("Clock", js, css)?;
//! db.runtime().set_mounted(&widget.id, true, now_ms)?;
//! ```

pub mod app;
pub mod config;
pub mod database;

pub use app::ByteframesApp;
pub use config::{format_size, get_sqlite_info, ByteframesConfig, SqliteDatabaseInfo};

pub use database::{
    Config, ConfigWidget, DatabaseConn, OverlayDatabase, SchemaDefinitions, SchemaManager,
    SchemaStatus, Setting, Widget, WidgetRuntime, WidgetWithConfig, SCHEMA_VERSION,
};
