use byteframes::{ByteframesApp, ByteframesConfig};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

mod commands;

use commands::database::DatabaseArgs;
use commands::link::LinkCommands;
use commands::runtime::RuntimeCommands;
use commands::scene::SceneCommands;
use commands::setting::SettingCommands;
use commands::widget::WidgetCommands;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.byteframes/byteframes.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Use this database file instead of the configured one
    #[clap(long, global = true)]
    db: Option<String>,

    /// Pretty-print JSON output
    #[clap(long, global = true)]
    pretty: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage scenes (widget configurations)
    Scene {
        #[clap(subcommand)]
        commands: SceneCommands,
    },

    /// Manage widget definitions
    Widget {
        #[clap(subcommand)]
        commands: WidgetCommands,
    },

    /// Place widgets into scenes
    Link {
        #[clap(subcommand)]
        commands: LinkCommands,
    },

    /// Inspect or record widget mount state
    Runtime {
        #[clap(subcommand)]
        commands: RuntimeCommands,
    },

    /// Read and write key/value settings
    Setting {
        #[clap(subcommand)]
        commands: SettingCommands,
    },

    /// Database status and maintenance
    Database(DatabaseArgs),

    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            // filter spans/events with level TRACE or higher.
            .with_max_level(Level::INFO)
            .init();
    }

    let mut config = match ByteframesConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = cli.db.as_deref() {
        override_database_path(&mut config, path);
    }

    let pretty = cli.pretty;
    let ok = match cli.command {
        Commands::Config { json } => {
            commands::config::run(&config, json, pretty);
            true
        }
        Commands::Database(args) => commands::database::run(&config, args, pretty),
        command => {
            let app = match ByteframesApp::startup(&config) {
                Ok(app) => app,
                Err(e) => {
                    eprintln!("ERROR: failed to open database: {}", e);
                    std::process::exit(1);
                }
            };
            info!("using database {}", config.database_path());
            run_app_command(&app, command, pretty)
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn run_app_command(app: &ByteframesApp, command: Commands, pretty: bool) -> bool {
    match command {
        Commands::Scene { commands: cmd } => commands::scene::run(app, cmd, pretty),
        Commands::Widget { commands: cmd } => commands::widget::run(app, cmd, pretty),
        Commands::Link { commands: cmd } => commands::link::run(app, cmd, pretty),
        Commands::Runtime { commands: cmd } => commands::runtime::run(app, cmd, pretty),
        Commands::Setting { commands: cmd } => commands::setting::run(app, cmd, pretty),
        Commands::Database(_) | Commands::Config { .. } => true,
    }
}

fn override_database_path(config: &mut ByteframesConfig, path: &str) {
    let path = std::path::Path::new(path);
    if let Some(file) = path.file_name() {
        config.database_file = file.to_string_lossy().to_string();
    }
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => config.data_dir = dir.to_string_lossy().to_string(),
        None => config.data_dir = ".".to_string(),
    }
}
