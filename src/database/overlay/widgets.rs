//! Widget definition repository

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::ids::{new_widget_id, unix_now};
use super::types::Widget;

const WIDGET_COLUMNS: &str = "id, name, js_code, css_code, created_at, updated_at";

/// Repository for widget definitions
pub struct WidgetRepository<'a> {
    conn: &'a Connection,
}

pub(crate) fn widget_from_row(row: &Row<'_>) -> rusqlite::Result<Widget> {
    Ok(Widget {
        id: row.get(0)?,
        name: row.get(1)?,
        js_code: row.get(2)?,
        css_code: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl<'a> WidgetRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM widgets", [], |row| row.get(0))
            .map_err(|e| anyhow!("Failed to count widgets: {}", e))?;
        Ok(count)
    }

    /// All widgets, newest first
    pub fn list(&self) -> Result<Vec<Widget>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM widgets ORDER BY created_at DESC, id DESC",
                WIDGET_COLUMNS
            ))
            .map_err(|e| anyhow!("Failed to prepare widget query: {}", e))?;

        let widgets = stmt
            .query_map([], widget_from_row)
            .map_err(|e| anyhow!("Failed to list widgets: {}", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| anyhow!("Failed to read widget row: {}", e))?;

        Ok(widgets)
    }

    pub fn get(&self, id: &str) -> Result<Option<Widget>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM widgets WHERE id = ?1", WIDGET_COLUMNS),
                [id],
                widget_from_row,
            )
            .optional()
            .map_err(|e| anyhow!("Failed to get widget '{}': {}", id, e))
    }

    /// Create a widget together with its unmounted runtime row
    pub fn create(&self, name: &str, js_code: &str, css_code: &str) -> Result<Widget> {
        let now = unix_now();
        let widget = Widget {
            id: new_widget_id(),
            name: name.to_string(),
            js_code: js_code.to_string(),
            css_code: css_code.to_string(),
            created_at: now,
            updated_at: now,
        };

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| anyhow!("Failed to begin transaction: {}", e))?;

        tx.execute(
            "INSERT INTO widgets (id, name, js_code, css_code, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                widget.id,
                widget.name,
                widget.js_code,
                widget.css_code,
                widget.created_at,
                widget.updated_at
            ],
        )
        .map_err(|e| anyhow!("Failed to create widget: {}", e))?;

        tx.execute(
            "INSERT OR IGNORE INTO widget_runtime (widget_id, is_mounted, mounted_at) VALUES (?1, 0, 0)",
            [&widget.id],
        )
        .map_err(|e| anyhow!("Failed to initialize widget runtime: {}", e))?;

        tx.commit()
            .map_err(|e| anyhow!("Failed to commit widget creation: {}", e))?;

        Ok(widget)
    }

    pub fn update(&self, id: &str, name: &str, js_code: &str, css_code: &str) -> Result<()> {
        self.conn
            .execute(
                "UPDATE widgets SET name = ?1, js_code = ?2, css_code = ?3, updated_at = ?4 WHERE id = ?5",
                params![name, js_code, css_code, unix_now(), id],
            )
            .map_err(|e| anyhow!("Failed to update widget '{}': {}", id, e))?;
        Ok(())
    }

    /// Delete a widget; its placements and runtime row cascade
    pub fn delete(&self, id: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM widgets WHERE id = ?1", [id])
            .map_err(|e| anyhow!("Failed to delete widget '{}': {}", id, e))?;
        Ok(())
    }
}
