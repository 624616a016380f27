use byteframes::ByteframesApp;
use clap::Subcommand;

use super::print_response;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingCommands {
    /// Show one setting (`{}` when unset)
    Get { key: String },

    /// Set a setting
    Set { key: String, value: String },

    /// List all settings
    List,

    /// Remove a setting
    Delete { key: String },
}

pub fn run(app: &ByteframesApp, command: SettingCommands, pretty: bool) -> bool {
    let body = match command {
        SettingCommands::Get { key } => app.get_setting(&key),
        SettingCommands::Set { key, value } => app.set_setting(&key, &value),
        SettingCommands::List => app.get_all_settings(),
        SettingCommands::Delete { key } => app.delete_setting(&key),
    };
    print_response(&body, pretty)
}
