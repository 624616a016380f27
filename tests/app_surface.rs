use byteframes::{get_sqlite_info, ByteframesApp, ByteframesConfig};
use serde_json::Value;

fn config_in(dir: &tempfile::TempDir) -> ByteframesConfig {
    ByteframesConfig {
        data_dir: dir.path().join("data").to_string_lossy().to_string(),
        database_file: "overlay.db".to_string(),
    }
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[test]
fn test_startup_creates_file_and_seeds_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    {
        let app = ByteframesApp::startup(&config).unwrap();
        let configs = parse(&app.get_configs());
        assert_eq!(configs.as_array().unwrap().len(), 1);
        assert_eq!(configs[0]["name"], "Default Scene");
        assert_eq!(configs[0]["is_active"], 1);
    }
    assert!(std::path::Path::new(&config.database_path()).exists());

    let app = ByteframesApp::startup(&config).unwrap();
    let configs = parse(&app.get_configs());
    assert_eq!(configs.as_array().unwrap().len(), 1);
    let widgets = parse(&app.get_widgets());
    assert_eq!(widgets.as_array().unwrap().len(), 1);
    assert_eq!(widgets[0]["name"], "Clock Widget");
}

#[test]
fn test_data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let (scene_id, widget_id) = {
        let app = ByteframesApp::startup(&config).unwrap();
        let scene = parse(&app.create_config("Streaming"));
        let widget = parse(&app.create_widget("Chat", "export default {}", ".chat{}"));
        let scene_id = scene["id"].as_str().unwrap().to_string();
        let widget_id = widget["id"].as_str().unwrap().to_string();

        assert_eq!(
            parse(&app.add_widget_to_config(&scene_id, &widget_id, true, 3)),
            serde_json::json!({"success": true})
        );
        app.set_config_widget_position(&scene_id, &widget_id, 120, -40);
        app.set_config_active(&scene_id, true);
        app.set_widget_mounted(&widget_id, true, 1_700_000_000_000);
        app.set_setting("theme", "dark");
        (scene_id, widget_id)
    };

    let app = ByteframesApp::startup(&config).unwrap();

    let configs = parse(&app.get_configs());
    let active: Vec<_> = configs
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["is_active"] == 1)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], scene_id.as_str());

    let placed = parse(&app.get_config_widgets(&scene_id));
    assert_eq!(placed.as_array().unwrap().len(), 1);
    assert_eq!(placed[0]["id"], widget_id.as_str());
    assert_eq!(placed[0]["z_index"], 3);
    assert_eq!(placed[0]["position_x"], 120);
    assert_eq!(placed[0]["position_y"], -40);
    assert_eq!(placed[0]["is_mounted"], 1);

    let runtime = parse(&app.get_widget_runtime(&widget_id));
    assert_eq!(runtime["mounted_at"], 1_700_000_000_000i64);

    let setting = parse(&app.get_setting("theme"));
    assert_eq!(setting["value"], "dark");
}

#[test]
fn test_sqlite_info_after_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let before = get_sqlite_info(&config);
    assert!(!before.exists);

    drop(ByteframesApp::startup(&config).unwrap());

    let info = get_sqlite_info(&config);
    assert!(info.exists);
    assert!(info.schema_initialized);
    assert_eq!(info.active_config.as_deref(), Some("Default Scene"));
    assert_eq!(info.table_counts.get("widgets"), Some(&1));
    assert_eq!(info.table_counts.get("settings"), Some(&0));
}

#[test]
fn test_deleting_widget_cleans_up_links_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let scene_id = {
        let app = ByteframesApp::startup(&config).unwrap();
        let configs = parse(&app.get_configs());
        let scene_id = configs[0]["id"].as_str().unwrap().to_string();
        let widgets = parse(&app.get_config_widgets(&scene_id));
        let widget_id = widgets[0]["id"].as_str().unwrap().to_string();
        assert_eq!(
            parse(&app.delete_widget(&widget_id)),
            serde_json::json!({"success": true})
        );
        scene_id
    };

    let app = ByteframesApp::startup(&config).unwrap();
    assert_eq!(parse(&app.get_config_widgets(&scene_id)), serde_json::json!([]));
    assert_eq!(parse(&app.get_widgets()), serde_json::json!([]));
}
