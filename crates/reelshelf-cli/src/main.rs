use anyhow::Result;
use clap::Parser;
use reelshelf_core::{EntryRef, MediaKind};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod tui;

use commands::EntryFields;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "reelshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/reelshelf/reelshelf.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List every entry as a card
    #[command(alias = "ls")]
    List {
        /// Only show movies or only series
        #[arg(long)]
        kind: Option<MediaKind>,
    },
    /// Show one entry in full
    Show {
        /// Position (as shown by `list`) or entry id
        target: EntryRef,
    },
    /// Add a movie or series
    ///
    /// Title, year and genre are required. New entries start unrated and
    /// are appended to the end of the shelf.
    Add(EntryFields),
    /// Change an existing entry
    ///
    /// The entry is loaded into the form, the given flags overwrite its
    /// fields, and the result replaces it. Its rating is kept. Switching
    /// --kind keeps the old runtime or season count around in case you
    /// switch back.
    Edit {
        /// Position (as shown by `list`) or entry id
        target: EntryRef,

        #[command(flatten)]
        fields: EntryFields,
    },
    /// Remove an entry; later entries move up one position
    #[command(alias = "rm")]
    Delete {
        /// Position (as shown by `list`) or entry id
        target: EntryRef,
    },
    /// Give an entry one to five stars
    Rate {
        /// Position (as shown by `list`) or entry id
        target: EntryRef,

        /// Number of stars, 1-5
        stars: u8,
    },
    /// Write the shelf as JSON
    Export {
        /// File to write (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Load entries from a JSON export
    Import {
        /// File written by `reelshelf export`
        path: PathBuf,

        /// Add to the shelf instead of replacing it
        #[arg(long)]
        append: bool,
    },
    /// Show shelf statistics
    Status,
    /// Browse and edit the shelf interactively
    Tui,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one setting, or the whole config file
    Get {
        key: Option<String>,
    },
    /// Change a setting in the config file
    Set {
        key: String,
        value: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn init_logging(level: &str, quiet: bool) {
    let filter = if quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.db {
        Some(db) => Config::load_with_db_path(db)?,
        None => Config::load()?,
    };

    // The TUI owns the terminal; log lines would tear through it.
    init_logging(&config.log_level, matches!(cli.command, Commands::Tui));

    let db_path = config.database_path.clone();

    // Ensure database directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match cli.command {
        Commands::List { kind } => commands::list_entries(&db_path, kind)?,
        Commands::Show { target } => commands::show_entry(&db_path, target)?,
        Commands::Add(fields) => commands::add_entry(&db_path, &fields)?,
        Commands::Edit { target, fields } => commands::edit_entry(&db_path, target, &fields)?,
        Commands::Delete { target } => commands::delete_entry(&db_path, target)?,
        Commands::Rate { target, stars } => commands::rate_entry(&db_path, target, stars)?,
        Commands::Export { output } => commands::export_entries(&db_path, output.as_deref())?,
        Commands::Import { path, append } => commands::import_entries(&db_path, &path, append)?,
        Commands::Status => commands::show_status(&db_path)?,
        Commands::Tui => tui::run_on_database(&db_path)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Set { key, value } => commands::config::set_config(key, value)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}

/// Print an error. Stale positions and rejected input get a short notice;
/// anything else gets the full cause chain.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<reelshelf_core::Error>() {
        Some(e) if e.is_recoverable() => eprintln!("✗ {e}"),
        _ => eprintln!("Error: {err:#}"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
