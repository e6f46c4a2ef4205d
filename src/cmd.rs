//! Command implementations for the CLI interface.
//!
//! Three entry points: the interactive session (the normal way to use the
//! tool), a file converter for the two interchange formats, and shell
//! completion generation.

use std::path::PathBuf;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::codec;
use crate::fields::{SortMode, StatusFilter};
use crate::query::TaskFilter;
use crate::store::TaskStore;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default when no command is given).
    Ui {
        /// Seed the session from a previously exported .csv or .json file.
        #[arg(long)]
        load: Option<PathBuf>,
        /// Initial sort mode for the list view.
        #[arg(long, value_enum, default_value_t = SortMode::Insertion)]
        sort: SortMode,
        /// Initial completion filter.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },

    /// Convert an exported file between CSV and JSON.
    Convert {
        /// Input file (.csv or .json).
        input: PathBuf,
        /// Output file; the extension picks the format.
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Start the interactive session, optionally seeded from an exported file.
pub fn cmd_ui(load: Option<PathBuf>, sort: SortMode, status: StatusFilter) {
    let mut store = TaskStore::new();
    if let Some(path) = load {
        match codec::import_file(&mut store, &path) {
            Ok(count) => println!("Loaded {} task(s) from {}", count, path.display()),
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    let filter = TaskFilter {
        status,
        ..Default::default()
    };
    if let Err(e) = run_tui(store, filter, sort) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Read one interchange file into a fresh store and write it back out in the
/// output file's format.
pub fn cmd_convert(input: PathBuf, output: PathBuf) {
    let mut store = TaskStore::new();
    let count = match codec::import_file(&mut store, &input) {
        Ok(count) => count,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", input.display());
            std::process::exit(1);
        }
    };
    if let Err(e) = codec::export_file(&store, &output) {
        eprintln!("Failed to write {}: {e}", output.display());
        std::process::exit(1);
    }
    println!("Converted {} task(s) to {}", count, output.display());
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
