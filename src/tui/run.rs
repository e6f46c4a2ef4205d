//! Terminal setup and the TUI entry point.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::fields::SortMode;
use crate::query::TaskFilter;
use crate::store::TaskStore;
use crate::tui::app::App;

/// Run the interactive session until the user quits.
///
/// Takes ownership of the store: its contents die with the session unless
/// the user exported them.
pub fn run_tui(store: TaskStore, filter: TaskFilter, sort: SortMode) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, filter, sort);
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
