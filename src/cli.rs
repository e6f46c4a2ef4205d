use clap::Parser;

use crate::cmd::Commands;

/// Terminal to-do list. Tasks live in memory for the session; use the
/// export/import keys (or --load) to carry them across sessions.
#[derive(Parser)]
#[command(name = "todo", version, about = "Personal to-do list for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}
