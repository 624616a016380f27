use byteframes::ByteframesApp;
use clap::{ArgGroup, Subcommand};

use super::print_response;

/// Placement subcommands (widgets inside scenes)
#[derive(Subcommand)]
pub enum LinkCommands {
    /// Place a widget in a scene (re-adding keeps its position)
    Add {
        scene_id: String,
        widget_id: String,

        /// Place the widget hidden
        #[clap(long)]
        disabled: bool,

        /// Stacking order, lower is drawn first
        #[clap(short, long, default_value_t = 0, allow_hyphen_values = true)]
        z_index: i64,
    },

    /// Remove a widget from a scene (the widget itself is kept)
    Remove { scene_id: String, widget_id: String },

    /// Change visibility and/or stacking order of a placed widget
    ///
    /// Options left out keep their stored value.
    #[clap(group(
        ArgGroup::new("fields")
            .required(true)
            .multiple(true)
            .args(["enabled", "z_index"])
    ))]
    Update {
        scene_id: String,
        widget_id: String,

        /// Show (true) or hide (false) the widget
        #[clap(long)]
        enabled: Option<bool>,

        /// New stacking order
        #[clap(short, long, allow_hyphen_values = true)]
        z_index: Option<i64>,
    },

    /// Move a placed widget
    Move {
        scene_id: String,
        widget_id: String,
        #[clap(allow_hyphen_values = true)]
        x: i64,
        #[clap(allow_hyphen_values = true)]
        y: i64,
    },
}

pub fn run(app: &ByteframesApp, command: LinkCommands, pretty: bool) -> bool {
    let body = match command {
        LinkCommands::Add {
            scene_id,
            widget_id,
            disabled,
            z_index,
        } => app.add_widget_to_config(&scene_id, &widget_id, !disabled, z_index),
        LinkCommands::Remove {
            scene_id,
            widget_id,
        } => app.remove_widget_from_config(&scene_id, &widget_id),
        LinkCommands::Update {
            scene_id,
            widget_id,
            enabled,
            z_index,
        } => app.patch_config_widget(&scene_id, &widget_id, enabled, z_index),
        LinkCommands::Move {
            scene_id,
            widget_id,
            x,
            y,
        } => app.set_config_widget_position(&scene_id, &widget_id, x, y),
    };
    print_response(&body, pretty)
}
