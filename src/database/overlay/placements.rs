//! Config <-> widget placement repository

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::types::{ConfigWidget, WidgetWithConfig};
use super::widgets::widget_from_row;

/// Repository for the many-to-many placement of widgets within configs
pub struct PlacementRepository<'a> {
    conn: &'a Connection,
}

impl<'a> PlacementRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn get(&self, config_id: &str, widget_id: &str) -> Result<Option<ConfigWidget>> {
        self.conn
            .query_row(
                "SELECT config_id, widget_id, enabled, z_index, position_x, position_y
                 FROM config_widgets
                 WHERE config_id = ?1 AND widget_id = ?2",
                [config_id, widget_id],
                |row| {
                    Ok(ConfigWidget {
                        config_id: row.get(0)?,
                        widget_id: row.get(1)?,
                        enabled: row.get(2)?,
                        z_index: row.get(3)?,
                        position_x: row.get(4)?,
                        position_y: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(|e| anyhow!("Failed to get placement: {}", e))
    }

    /// Widgets placed in a config, bottom layer first
    ///
    /// Widgets without a runtime row report `is_mounted = false`.
    pub fn list_for_config(&self, config_id: &str) -> Result<Vec<WidgetWithConfig>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT
                    -- widget columns first, in widget_from_row order
                    w.id, w.name, w.js_code, w.css_code, w.created_at, w.updated_at,
                    cw.enabled, cw.z_index, cw.position_x, cw.position_y,
                    COALESCE(wr.is_mounted, 0) AS is_mounted
                 FROM widgets w
                 INNER JOIN config_widgets cw ON w.id = cw.widget_id
                 LEFT JOIN widget_runtime wr ON w.id = wr.widget_id
                 WHERE cw.config_id = ?1
                 ORDER BY cw.z_index ASC, w.created_at ASC, w.id ASC",
            )
            .map_err(|e| anyhow!("Failed to prepare config widget query: {}", e))?;

        let widgets = stmt
            .query_map([config_id], |row| {
                Ok(WidgetWithConfig {
                    widget: widget_from_row(row)?,
                    enabled: row.get(6)?,
                    z_index: row.get(7)?,
                    position_x: row.get(8)?,
                    position_y: row.get(9)?,
                    is_mounted: row.get(10)?,
                })
            })
            .map_err(|e| anyhow!("Failed to list widgets for config '{}': {}", config_id, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| anyhow!("Failed to read config widget row: {}", e))?;

        Ok(widgets)
    }

    /// Place a widget in a config
    ///
    /// Re-adding an existing placement updates `enabled` and `z_index` but
    /// keeps the stored position.
    pub fn add(&self, config_id: &str, widget_id: &str, enabled: bool, z_index: i64) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO config_widgets (config_id, widget_id, enabled, z_index)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(config_id, widget_id) DO UPDATE SET
                    enabled = excluded.enabled,
                    z_index = excluded.z_index",
                params![config_id, widget_id, enabled, z_index],
            )
            .map_err(|e| anyhow!("Failed to add widget to config: {}", e))?;
        Ok(())
    }

    pub fn remove(&self, config_id: &str, widget_id: &str) -> Result<()> {
        self.conn
            .execute(
                "DELETE FROM config_widgets WHERE config_id = ?1 AND widget_id = ?2",
                [config_id, widget_id],
            )
            .map_err(|e| anyhow!("Failed to remove widget from config: {}", e))?;
        Ok(())
    }

    pub fn update(
        &self,
        config_id: &str,
        widget_id: &str,
        enabled: bool,
        z_index: i64,
    ) -> Result<()> {
        self.conn
            .execute(
                "UPDATE config_widgets SET enabled = ?1, z_index = ?2 WHERE config_id = ?3 AND widget_id = ?4",
                params![enabled, z_index, config_id, widget_id],
            )
            .map_err(|e| anyhow!("Failed to update config widget: {}", e))?;
        Ok(())
    }

    /// Update only the given fields of a placement
    ///
    /// `None` keeps the stored value.
    pub fn patch(
        &self,
        config_id: &str,
        widget_id: &str,
        enabled: Option<bool>,
        z_index: Option<i64>,
    ) -> Result<()> {
        self.conn
            .execute(
                "UPDATE config_widgets
                 SET enabled = COALESCE(?1, enabled), z_index = COALESCE(?2, z_index)
                 WHERE config_id = ?3 AND widget_id = ?4",
                params![enabled, z_index, config_id, widget_id],
            )
            .map_err(|e| anyhow!("Failed to update config widget: {}", e))?;
        Ok(())
    }

    pub fn set_position(
        &self,
        config_id: &str,
        widget_id: &str,
        position_x: i64,
        position_y: i64,
    ) -> Result<()> {
        self.conn
            .execute(
                "UPDATE config_widgets SET position_x = ?1, position_y = ?2 WHERE config_id = ?3 AND widget_id = ?4",
                params![position_x, position_y, config_id, widget_id],
            )
            .map_err(|e| anyhow!("Failed to move config widget: {}", e))?;
        Ok(())
    }
}
