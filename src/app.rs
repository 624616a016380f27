//! JSON-string function-call surface for the host shell
//!
//! Every method takes primitive arguments and returns a JSON document:
//! the serialized result, `{"success": true}` for writes, or
//! `{"error": "<message>"}` when the database call failed. Callers detect
//! failure by the presence of the `error` key.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::ByteframesConfig;
use crate::database::{ensure_data_dir, OverlayDatabase};

/// Serialize a successful payload, or the error as `{"error": ...}`
pub fn to_response<T: Serialize>(result: Result<T>) -> String {
    match result.and_then(|value| serde_json::to_string(&value).map_err(anyhow::Error::from)) {
        Ok(body) => body,
        Err(e) => error_response(&e),
    }
}

pub fn error_response(error: &anyhow::Error) -> String {
    debug!("returning error response: {}", error);
    json!({ "error": error.to_string() }).to_string()
}

pub fn success_response() -> String {
    json!({ "success": true }).to_string()
}

fn to_ack(result: Result<()>) -> String {
    match result {
        Ok(()) => success_response(),
        Err(e) => error_response(&e),
    }
}

/// Backend state shared with the host shell
///
/// Holds the single database handle. The mutex serializes calls arriving
/// from different shell threads.
pub struct ByteframesApp {
    db: Mutex<OverlayDatabase>,
}

impl ByteframesApp {
    /// Open the configured database and seed the default scene
    ///
    /// Failing to open or initialize the database is returned to the caller,
    /// which is expected to abort. A seeding failure is only logged.
    pub fn startup(config: &ByteframesConfig) -> Result<Self> {
        ensure_data_dir(&config.data_dir)?;
        let db = OverlayDatabase::open(&config.database_path())?;
        Ok(Self::with_database(db))
    }

    /// Wrap an already opened database, seeding it if empty
    pub fn with_database(db: OverlayDatabase) -> Self {
        if let Err(e) = db.seed_default_scene() {
            warn!("Failed to seed default scene: {}", e);
        }
        Self { db: Mutex::new(db) }
    }

    fn db(&self) -> Result<MutexGuard<'_, OverlayDatabase>> {
        self.db
            .lock()
            .map_err(|_| anyhow!("Database handle is poisoned"))
    }

    // ===== Configs =====

    pub fn get_configs(&self) -> String {
        to_response(self.db().and_then(|db| db.configs().list()))
    }

    pub fn create_config(&self, name: &str) -> String {
        to_response(self.db().and_then(|db| db.configs().create(name)))
    }

    /// Activating a config deactivates every other one
    pub fn set_config_active(&self, id: &str, active: bool) -> String {
        to_ack(self.db().and_then(|db| db.configs().set_active(id, active)))
    }

    pub fn rename_config(&self, id: &str, name: &str) -> String {
        to_ack(self.db().and_then(|db| db.configs().rename(id, name)))
    }

    pub fn delete_config(&self, id: &str) -> String {
        to_ack(self.db().and_then(|db| db.configs().delete(id)))
    }

    // ===== Widgets =====

    pub fn get_widgets(&self) -> String {
        to_response(self.db().and_then(|db| db.widgets().list()))
    }

    /// A missing widget yields `{}`
    pub fn get_widget(&self, id: &str) -> String {
        match self.db().and_then(|db| db.widgets().get(id)) {
            Ok(Some(widget)) => to_response(Ok(widget)),
            Ok(None) => json!({}).to_string(),
            Err(e) => error_response(&e),
        }
    }

    pub fn get_config_widgets(&self, config_id: &str) -> String {
        to_response(self.db().and_then(|db| db.placements().list_for_config(config_id)))
    }

    pub fn create_widget(&self, name: &str, js_code: &str, css_code: &str) -> String {
        to_response(
            self.db()
                .and_then(|db| db.widgets().create(name, js_code, css_code)),
        )
    }

    pub fn update_widget(&self, id: &str, name: &str, js_code: &str, css_code: &str) -> String {
        to_ack(
            self.db()
                .and_then(|db| db.widgets().update(id, name, js_code, css_code)),
        )
    }

    pub fn delete_widget(&self, id: &str) -> String {
        to_ack(self.db().and_then(|db| db.widgets().delete(id)))
    }

    // ===== Config <-> Widget links =====

    pub fn add_widget_to_config(
        &self,
        config_id: &str,
        widget_id: &str,
        enabled: bool,
        z_index: i64,
    ) -> String {
        to_ack(
            self.db()
                .and_then(|db| db.placements().add(config_id, widget_id, enabled, z_index)),
        )
    }

    pub fn remove_widget_from_config(&self, config_id: &str, widget_id: &str) -> String {
        to_ack(
            self.db()
                .and_then(|db| db.placements().remove(config_id, widget_id)),
        )
    }

    pub fn update_config_widget(
        &self,
        config_id: &str,
        widget_id: &str,
        enabled: bool,
        z_index: i64,
    ) -> String {
        to_ack(
            self.db()
                .and_then(|db| db.placements().update(config_id, widget_id, enabled, z_index)),
        )
    }

    /// Change only the given placement fields; `None` keeps the stored value
    pub fn patch_config_widget(
        &self,
        config_id: &str,
        widget_id: &str,
        enabled: Option<bool>,
        z_index: Option<i64>,
    ) -> String {
        to_ack(
            self.db()
                .and_then(|db| db.placements().patch(config_id, widget_id, enabled, z_index)),
        )
    }

    pub fn set_config_widget_position(
        &self,
        config_id: &str,
        widget_id: &str,
        position_x: i64,
        position_y: i64,
    ) -> String {
        to_ack(self.db().and_then(|db| {
            db.placements()
                .set_position(config_id, widget_id, position_x, position_y)
        }))
    }

    // ===== Widget runtime =====

    /// A widget without a runtime row reports the zeroed default
    pub fn get_widget_runtime(&self, widget_id: &str) -> String {
        to_response(
            self.db()
                .and_then(|db| db.runtime().get(widget_id))
                .map(Option::unwrap_or_default),
        )
    }

    pub fn set_widget_mounted(&self, widget_id: &str, is_mounted: bool, mounted_at: i64) -> String {
        to_ack(
            self.db()
                .and_then(|db| db.runtime().set_mounted(widget_id, is_mounted, mounted_at)),
        )
    }

    // ===== Settings =====

    /// A missing key yields `{}`
    pub fn get_setting(&self, key: &str) -> String {
        match self.db().and_then(|db| db.settings().get(key)) {
            Ok(Some(setting)) => to_response(Ok(setting)),
            Ok(None) => json!({}).to_string(),
            Err(e) => error_response(&e),
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> String {
        to_ack(self.db().and_then(|db| db.settings().set(key, value)))
    }

    pub fn get_all_settings(&self) -> String {
        to_response(self.db().and_then(|db| db.settings().list()))
    }

    pub fn delete_setting(&self, key: &str) -> String {
        to_ack(self.db().and_then(|db| db.settings().delete(key)))
    }

    /// Run `f` against the database handle directly (diagnostics, reset)
    pub fn with_db<T>(&self, f: impl FnOnce(&OverlayDatabase) -> Result<T>) -> Result<T> {
        let db = self.db()?;
        f(&db)
    }
}

impl From<OverlayDatabase> for ByteframesApp {
    fn from(db: OverlayDatabase) -> Self {
        Self::with_database(db)
    }
}
