use byteframes::ByteframesApp;
use clap::Subcommand;

use super::print_response;

/// Scene (config) subcommands
#[derive(Subcommand)]
pub enum SceneCommands {
    /// List all scenes, newest first
    List,

    /// Create a new, inactive scene
    Create {
        /// Scene name
        name: String,
    },

    /// Make a scene the active one (deactivates all others)
    Activate {
        /// Scene id, e.g. cfg_1700000000000000000
        id: String,
    },

    /// Deactivate a scene
    Deactivate { id: String },

    /// Rename a scene
    Rename { id: String, name: String },

    /// Delete a scene and its widget placements
    Delete { id: String },

    /// List the widgets placed in a scene, bottom layer first
    Widgets { id: String },
}

pub fn run(app: &ByteframesApp, command: SceneCommands, pretty: bool) -> bool {
    let body = match command {
        SceneCommands::List => app.get_configs(),
        SceneCommands::Create { name } => app.create_config(&name),
        SceneCommands::Activate { id } => app.set_config_active(&id, true),
        SceneCommands::Deactivate { id } => app.set_config_active(&id, false),
        SceneCommands::Rename { id, name } => app.rename_config(&id, &name),
        SceneCommands::Delete { id } => app.delete_config(&id),
        SceneCommands::Widgets { id } => app.get_config_widgets(&id),
    };
    print_response(&body, pretty)
}
