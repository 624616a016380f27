use std::path::PathBuf;

use anyhow::anyhow;
use byteframes::ByteframesApp;
use clap::Subcommand;

use super::{print_response, read_code};

/// Widget subcommands
#[derive(Subcommand)]
pub enum WidgetCommands {
    /// List all widget definitions, newest first
    List,

    /// Show one widget definition
    Show { id: String },

    /// Create a widget definition
    Create {
        /// Widget name
        name: String,

        /// File holding the widget's JS module (`-` for stdin)
        #[clap(long)]
        js: Option<PathBuf>,

        /// File holding the widget's CSS (`-` for stdin)
        #[clap(long)]
        css: Option<PathBuf>,
    },

    /// Update a widget; omitted fields keep their current value
    Update {
        id: String,

        /// New widget name
        #[clap(long)]
        name: Option<String>,

        /// File holding the new JS module (`-` for stdin)
        #[clap(long)]
        js: Option<PathBuf>,

        /// File holding the new CSS (`-` for stdin)
        #[clap(long)]
        css: Option<PathBuf>,
    },

    /// Delete a widget together with its placements and runtime state
    Delete { id: String },
}

pub fn run(app: &ByteframesApp, command: WidgetCommands, pretty: bool) -> bool {
    match command {
        WidgetCommands::List => print_response(&app.get_widgets(), pretty),
        WidgetCommands::Show { id } => print_response(&app.get_widget(&id), pretty),
        WidgetCommands::Create { name, js, css } => match create(app, &name, js, css) {
            Ok(body) => print_response(&body, pretty),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                false
            }
        },
        WidgetCommands::Update { id, name, js, css } => {
            match update(app, &id, name, js, css) {
                Ok(body) => print_response(&body, pretty),
                Err(e) => {
                    eprintln!("ERROR: {}", e);
                    false
                }
            }
        }
        WidgetCommands::Delete { id } => print_response(&app.delete_widget(&id), pretty),
    }
}

fn create(
    app: &ByteframesApp,
    name: &str,
    js: Option<PathBuf>,
    css: Option<PathBuf>,
) -> anyhow::Result<String> {
    let js_code = js.map(|path| read_code(&path)).transpose()?;
    let css_code = css.map(|path| read_code(&path)).transpose()?;

    Ok(app.create_widget(
        name,
        js_code.as_deref().unwrap_or(""),
        css_code.as_deref().unwrap_or(""),
    ))
}

fn update(
    app: &ByteframesApp,
    id: &str,
    name: Option<String>,
    js: Option<PathBuf>,
    css: Option<PathBuf>,
) -> anyhow::Result<String> {
    let current = app
        .with_db(|db| db.widgets().get(id))?
        .ok_or_else(|| anyhow!("Widget '{}' not found", id))?;

    let name = name.unwrap_or(current.name);
    let js_code = match js {
        Some(path) => read_code(&path)?,
        None => current.js_code,
    };
    let css_code = match css {
        Some(path) => read_code(&path)?,
        None => current.css_code,
    };

    Ok(app.update_widget(id, &name, &js_code, &css_code))
}
