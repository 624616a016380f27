use byteframes::ByteframesApp;
use chrono::Utc;
use clap::Subcommand;

use super::print_response;

/// Widget runtime subcommands
#[derive(Subcommand)]
pub enum RuntimeCommands {
    /// Show the mount state of a widget
    Get { widget_id: String },

    /// Record a widget as mounted, stamped with the current time in milliseconds
    Mount {
        widget_id: String,

        /// Explicit mount time (Unix milliseconds)
        #[clap(long)]
        at: Option<i64>,
    },

    /// Record a widget as unmounted
    Unmount { widget_id: String },
}

pub fn run(app: &ByteframesApp, command: RuntimeCommands, pretty: bool) -> bool {
    let body = match command {
        RuntimeCommands::Get { widget_id } => app.get_widget_runtime(&widget_id),
        RuntimeCommands::Mount { widget_id, at } => {
            let mounted_at = at.unwrap_or_else(|| Utc::now().timestamp_millis());
            app.set_widget_mounted(&widget_id, true, mounted_at)
        }
        RuntimeCommands::Unmount { widget_id } => app.set_widget_mounted(&widget_id, false, 0),
    };
    print_response(&body, pretty)
}
