use byteframes::{format_size, get_sqlite_info, ByteframesApp, ByteframesConfig, SqliteDatabaseInfo};
use clap::{Args, Subcommand};

/// Arguments for the Database command
#[derive(Args)]
pub struct DatabaseArgs {
    /// Output status as JSON
    #[clap(long)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Option<DatabaseCommands>,
}

/// Database subcommands
#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// Show database status (default when no subcommand)
    Status,

    /// Drop all overlay data and re-create the default scene
    Reset {
        /// Skip confirmation prompt
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

pub fn run(config: &ByteframesConfig, args: DatabaseArgs, pretty: bool) -> bool {
    let json = args.json;
    match args.command {
        None | Some(DatabaseCommands::Status) => {
            run_status(config, json, pretty);
            true
        }
        Some(DatabaseCommands::Reset { yes }) => run_reset(config, yes),
    }
}

fn run_status(config: &ByteframesConfig, json: bool, pretty: bool) {
    let info = get_sqlite_info(config);

    if json || pretty {
        let serialized = if pretty {
            serde_json::to_string_pretty(&info)
        } else {
            serde_json::to_string(&info)
        };
        match serialized {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Error serializing database status: {}", e),
        }
        return;
    }

    print_status_table(&info);
}

fn print_status_table(info: &SqliteDatabaseInfo) {
    println!("SQLite Database:");
    println!("  Path:           {}", info.path);
    println!(
        "  Status:         {}",
        if info.exists { "exists" } else { "not created" }
    );
    if let Some(size) = info.size_bytes {
        println!("  Size:           {}", format_size(size));
    }
    println!(
        "  Schema:         {}",
        match (info.schema_initialized, info.schema_version) {
            (true, Some(v)) => format!("initialized (v{})", v),
            (true, None) => "initialized".to_string(),
            _ => "not initialized".to_string(),
        }
    );
    if let Some(active) = &info.active_config {
        println!("  Active scene:   {}", active);
    }

    if !info.table_counts.is_empty() {
        println!();
        println!("Tables:");
        let mut counts: Vec<_> = info.table_counts.iter().collect();
        counts.sort();
        for (table, count) in counts {
            println!("  {:<16}{}", format!("{}:", table), count);
        }
    }
}

fn run_reset(config: &ByteframesConfig, yes: bool) -> bool {
    if !yes {
        eprintln!(
            "This removes every scene, widget and setting in {}.",
            config.database_path()
        );
        eprintln!("Re-run with --yes to confirm.");
        return false;
    }

    let app = match ByteframesApp::startup(config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return false;
        }
    };

    let result = app.with_db(|db| {
        db.reset()?;
        db.seed_default_scene()
    });

    match result {
        Ok(_) => {
            println!("Database reset: {}", config.database_path());
            true
        }
        Err(e) => {
            eprintln!("ERROR: failed to reset database: {}", e);
            false
        }
    }
}
