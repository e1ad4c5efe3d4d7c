//! CLI host for the Kujikuji lottery.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::SessionArgs;

#[derive(Parser)]
#[command(
    name = "kuji",
    about = "Kujikuji: draw names one at a time, without replacement",
    version,
    propagate_version = true
)]
struct Cli {
    /// Roster file
    #[arg(short, long, global = true, default_value = "kujikuji.json")]
    store: PathBuf,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add entries to the roster
    Add {
        /// Names to add (blank names are skipped)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Replace the roster with numbered entries (User 1, User 2, ...)
    Generate {
        /// Number of entries to create
        count: usize,
    },

    /// List roster entries and their draw status
    List,

    /// Rename an entry
    Rename {
        /// Entry ID or unique ID prefix
        id: String,

        /// New name
        name: String,
    },

    /// Remove an entry from the roster
    Remove {
        /// Entry ID or unique ID prefix
        id: String,
    },

    /// Show draw progress
    Stats,

    /// Show where each undrawn entry would stand
    Layout {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Draw one entry and record it
    Draw {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Run an interactive draw session on stdin
    Play {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show the draw order
    History {
        /// Output format: text, markdown, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Undraw every entry (or, with --all, drop the roster)
    Reset {
        /// Also remove every entry
        #[arg(long)]
        all: bool,
    },

    /// Export the roster as JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the roster with a JSON export
    Import {
        /// File written by `kuji export`
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("KUJI_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = cli.store.as_path();
    let result = match cli.command {
        Commands::Add { names } => commands::roster::add(store, &names),
        Commands::Generate { count } => commands::roster::generate(store, count),
        Commands::List => commands::list::run(store),
        Commands::Rename { id, name } => commands::roster::rename(store, &id, &name),
        Commands::Remove { id } => commands::roster::remove(store, &id),
        Commands::Stats => commands::stats::run(store),
        Commands::Layout { session } => commands::layout::run(store, &session),
        Commands::Draw { session } => commands::draw::run(store, &session),
        Commands::Play { session } => commands::play::run(store, &session),
        Commands::History { format } => commands::history::run(store, &format),
        Commands::Reset { all } => commands::reset::run(store, all),
        Commands::Export { output } => commands::transfer::export(store, output.as_deref()),
        Commands::Import { file } => commands::transfer::import(store, &file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
