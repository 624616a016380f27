//! Widget runtime (mount state) repository

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::types::WidgetRuntime;

/// Repository for the per-widget mount state reported by the host shell
pub struct RuntimeRepository<'a> {
    conn: &'a Connection,
}

impl<'a> RuntimeRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, widget_id: &str) -> Result<Option<WidgetRuntime>> {
        self.conn
            .query_row(
                "SELECT widget_id, is_mounted, mounted_at FROM widget_runtime WHERE widget_id = ?1",
                [widget_id],
                |row| {
                    Ok(WidgetRuntime {
                        widget_id: row.get(0)?,
                        is_mounted: row.get(1)?,
                        mounted_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(|e| anyhow!("Failed to get runtime for widget '{}': {}", widget_id, e))
    }

    /// Upsert the mount state of a widget
    ///
    /// `mounted_at` is stored as given; the shell sends 0 when unmounting.
    pub fn set_mounted(&self, widget_id: &str, is_mounted: bool, mounted_at: i64) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO widget_runtime (widget_id, is_mounted, mounted_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(widget_id) DO UPDATE SET
                    is_mounted = excluded.is_mounted,
                    mounted_at = excluded.mounted_at",
                params![widget_id, is_mounted, mounted_at],
            )
            .map_err(|e| anyhow!("Failed to set runtime for widget '{}': {}", widget_id, e))?;
        Ok(())
    }
}
