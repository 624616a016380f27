//! Default scene seeded into an empty database

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

use super::ids::{new_config_id, new_widget_id, unix_now};

pub const DEFAULT_CONFIG_NAME: &str = "Default Scene";
pub const DEFAULT_WIDGET_NAME: &str = "Clock Widget";

pub const DEFAULT_WIDGET_JS: &str = r#"export default function Widget(ctx) {
  let raf = 0
  return {
    mount(el) {
      const span = document.createElement('div')
      span.className = 'widget-element'
      el.appendChild(span)
      const tick = () => {
        const now = new Date()
        span.textContent = now.toLocaleTimeString()
        raf = requestAnimationFrame(tick)
      }
      tick()
    },
    unmount() {
      cancelAnimationFrame(raf)
    }
  }
}"#;

pub const DEFAULT_WIDGET_CSS: &str = r#".widget-element {
  position: absolute;
  top: 16px;
  right: 16px;
  padding: 8px 12px;
  border-radius: 10px;
  background: rgba(0,0,0,0.55);
  color: #e5ecff;
  font-family: "SFMono-Regular", Consolas, monospace;
  font-size: 16px;
  pointer-events: none;
}"#;

/// Ids of the rows created by [`seed_default_scene`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededScene {
    pub config_id: String,
    pub widget_id: String,
}

/// Create the default scene if the configs table is empty
///
/// All four rows (config, widget, placement, runtime) are written in one
/// transaction. Returns `None` when configs already exist.
pub fn seed_default_scene(conn: &Connection) -> Result<Option<SeededScene>> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| anyhow!("Failed to begin transaction: {}", e))?;

    let count: u64 = tx
        .query_row("SELECT COUNT(*) FROM configs", [], |row| row.get(0))
        .map_err(|e| anyhow!("Failed to check configs: {}", e))?;
    if count > 0 {
        return Ok(None);
    }

    let now = unix_now();
    let scene = SeededScene {
        config_id: new_config_id(),
        widget_id: new_widget_id(),
    };

    tx.execute(
        "INSERT INTO configs (id, name, is_active, created_at, updated_at) VALUES (?1, ?2, 1, ?3, ?4)",
        params![scene.config_id, DEFAULT_CONFIG_NAME, now, now],
    )
    .map_err(|e| anyhow!("Failed to create default config: {}", e))?;

    tx.execute(
        "INSERT INTO widgets (id, name, js_code, css_code, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            scene.widget_id,
            DEFAULT_WIDGET_NAME,
            DEFAULT_WIDGET_JS,
            DEFAULT_WIDGET_CSS,
            now,
            now
        ],
    )
    .map_err(|e| anyhow!("Failed to create default widget: {}", e))?;

    tx.execute(
        "INSERT INTO config_widgets (config_id, widget_id, enabled, z_index) VALUES (?1, ?2, 1, 0)",
        params![scene.config_id, scene.widget_id],
    )
    .map_err(|e| anyhow!("Failed to link widget to config: {}", e))?;

    tx.execute(
        "INSERT INTO widget_runtime (widget_id, is_mounted, mounted_at) VALUES (?1, 0, 0)",
        [&scene.widget_id],
    )
    .map_err(|e| anyhow!("Failed to create widget runtime: {}", e))?;

    tx.commit()
        .map_err(|e| anyhow!("Failed to commit default scene: {}", e))?;

    Ok(Some(scene))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::OverlayDatabase;

    #[test]
    fn test_seeds_linked_clock_widget() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        let scene = seed_default_scene(db.connection()).unwrap().unwrap();

        let configs = db.configs().list().unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].name, DEFAULT_CONFIG_NAME);
        assert!(configs[0].is_active);

        let placed = db.placements().list_for_config(&scene.config_id).unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].widget.id, scene.widget_id);
        assert_eq!(placed[0].widget.name, DEFAULT_WIDGET_NAME);
        assert!(placed[0].widget.js_code.contains("requestAnimationFrame"));
        assert!(placed[0].enabled);
        assert_eq!(placed[0].z_index, 0);

        let runtime = db.runtime().get(&scene.widget_id).unwrap().unwrap();
        assert!(!runtime.is_mounted);
    }

    #[test]
    fn test_skips_when_configs_exist() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        db.configs().create("Mine").unwrap();

        assert!(seed_default_scene(db.connection()).unwrap().is_none());
        assert_eq!(db.configs().count().unwrap(), 1);
        assert_eq!(db.widgets().count().unwrap(), 0);
    }

    #[test]
    fn test_second_seed_is_noop() {
        let db = OverlayDatabase::open_in_memory().unwrap();
        assert!(seed_default_scene(db.connection()).unwrap().is_some());
        assert!(seed_default_scene(db.connection()).unwrap().is_none());
        assert_eq!(db.configs().count().unwrap(), 1);
        assert_eq!(db.widgets().count().unwrap(), 1);
    }
}
