//! # todo - Terminal To-Do List
//!
//! A single-session to-do list with filtering, sorting, manual reordering and
//! CSV/JSON interchange, driven by an interactive TUI.
//!
//! ## Key Features
//!
//! - **Session store**: tasks live in memory for one interactive session;
//!   nothing is written unless you export
//! - **Rich task fields**: priority (Urgent/Important/Normal), category
//!   (Work/Personal/Study/Other), due dates, completion state
//! - **Live view**: combine status, priority, category and search filters
//!   with four sort modes; incomplete tasks always list first
//! - **Manual ordering**: move tasks up and down in the unfiltered view
//! - **Interchange**: export and import the whole list as CSV (spreadsheet
//!   friendly) or JSON (lossless); imports tolerate messy input
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive session
//! todo
//!
//! # Resume from an earlier export
//! todo ui --load backup.json
//!
//! # Turn a spreadsheet export into JSON
//! todo convert tasks.csv -o tasks.json
//! ```
//!
//! In the session: `a` adds, `e` edits, `c` toggles completion, `d` deletes,
//! `J`/`K` reorder, `/` searches, `t`/`p`/`g` cycle filters, `o` cycles sort
//! modes, `x` exports, `i` imports, `h` shows the full key list.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod codec;
pub mod error;
pub mod fields;
pub mod query;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use fields::{SortMode, StatusFilter};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => cmd_ui(None, SortMode::Insertion, StatusFilter::All),
        Some(Commands::Ui { load, sort, status }) => cmd_ui(load, sort, status),
        Some(Commands::Convert { input, output }) => cmd_convert(input, output),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }
}
