//! Record types stored in the overlay database
//!
//! Flags are `bool` in Rust but travel as `0`/`1` integers, both in SQLite
//! and in the JSON handed to the UI shell.

use serde::{Deserialize, Serialize};

/// A named scene grouping placed widgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub id: String,
    pub name: String,
    #[serde(with = "flag")]
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A reusable overlay element definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub name: String,
    pub js_code: String,
    pub css_code: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Placement of a widget inside a config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigWidget {
    pub config_id: String,
    pub widget_id: String,
    #[serde(with = "flag")]
    pub enabled: bool,
    pub z_index: i64,
    pub position_x: i64,
    pub position_y: i64,
}

/// A widget joined with its placement in one config and its mount state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetWithConfig {
    #[serde(flatten)]
    pub widget: Widget,
    #[serde(with = "flag")]
    pub enabled: bool,
    pub z_index: i64,
    pub position_x: i64,
    pub position_y: i64,
    #[serde(with = "flag")]
    pub is_mounted: bool,
}

/// Mount state of a widget in the live overlay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRuntime {
    pub widget_id: String,
    #[serde(with = "flag")]
    pub is_mounted: bool,
    pub mounted_at: i64,
}

/// A flat key/value application preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

pub(crate) mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(i64::deserialize(deserializer)? != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flags_serialize_as_integers() {
        let config = Config {
            id: "cfg_1".to_string(),
            name: "Scene".to_string(),
            is_active: true,
            created_at: 10,
            updated_at: 11,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["is_active"], json!(1));
    }

    #[test]
    fn test_widget_with_config_is_flat() {
        let entry = WidgetWithConfig {
            widget: Widget {
                id: "wid_1".to_string(),
                name: "Clock".to_string(),
                js_code: String::new(),
                css_code: String::new(),
                created_at: 1,
                updated_at: 1,
            },
            enabled: true,
            z_index: 3,
            position_x: 0,
            position_y: 0,
            is_mounted: false,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], json!("wid_1"));
        assert_eq!(value["z_index"], json!(3));
        assert_eq!(value["enabled"], json!(1));
        assert_eq!(value["is_mounted"], json!(0));
        assert!(value.get("widget").is_none());
    }

    #[test]
    fn test_default_runtime_is_zeroed() {
        let value = serde_json::to_value(WidgetRuntime::default()).unwrap();
        assert_eq!(
            value,
            json!({"widget_id": "", "is_mounted": 0, "mounted_at": 0})
        );
    }

    #[test]
    fn test_flag_accepts_any_nonzero() {
        let runtime: WidgetRuntime =
            serde_json::from_str(r#"{"widget_id":"wid_1","is_mounted":2,"mounted_at":5}"#)
                .unwrap();
        assert!(runtime.is_mounted);
    }
}
