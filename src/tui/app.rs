//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates between the
//! different screens (task list, forms, dialogs, interchange prompts).

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, TimeZone, Utc};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::codec;
use crate::fields::{
    format_category, format_due_relative, format_priority, format_sort_mode,
    format_status_filter, parse_due_input, Category, Priority, SortMode, StatusFilter,
};
use crate::query::{view, TaskFilter};
use crate::store::{Direction, TaskPatch, TaskStore};
use crate::tui::{
    colors::{priority_color, CONFIRM_RED},
    enums::{AppState, InputMode},
    input::InputField,
    task_form::{TaskForm, CATEGORY_FIELD, DUE_FIELD, NAME_FIELD, PRIORITY_FIELD},
    utils::centered_rect,
};

/// Main application state for the terminal user interface.
///
/// Owns the session's task store, the current filter and sort selection, and
/// all screen state. The visible list is re-derived from the store on every
/// mutation; nothing is cached across interactions.
pub struct App {
    state: AppState,
    store: TaskStore,
    list_state: TableState,
    visible: Vec<u64>,
    selected_task: Option<u64>,
    form: TaskForm,
    input_mode: InputMode,
    status_message: String,
    filter: TaskFilter,
    sort: SortMode,
    search_active: bool,
    path_input: InputField,
    confirm_delete: Option<u64>,
}

impl App {
    /// Create a new App instance around an existing session store.
    pub fn new(store: TaskStore, filter: TaskFilter, sort: SortMode) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            list_state: TableState::default(),
            visible: Vec::new(),
            selected_task: None,
            form: TaskForm::new(),
            input_mode: InputMode::None,
            status_message: String::new(),
            filter,
            sort,
            search_active: false,
            path_input: InputField::new(),
            confirm_delete: None,
        };
        app.refresh_view();
        app
    }

    /// Re-derive the visible task list from the store.
    ///
    /// Runs the full filter + sort pipeline and tries to keep the selection
    /// on the same task id when it is still visible.
    fn refresh_view(&mut self) {
        let old_selected = self.selected_id();

        self.visible = view(self.store.tasks(), &self.filter, self.sort)
            .iter()
            .map(|t| t.id)
            .collect();

        if let Some(old_id) = old_selected {
            if let Some(new_idx) = self.visible.iter().position(|&id| id == old_id) {
                self.list_state.select(Some(new_idx));
            } else {
                self.list_state.select(if self.visible.is_empty() {
                    None
                } else {
                    Some(0)
                });
            }
        } else if !self.visible.is_empty() && self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        } else if self.visible.is_empty() {
            self.list_state.select(None);
        }
    }

    /// The id under the cursor, if any.
    fn selected_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    /// Manual reordering only makes sense on the full list in insertion
    /// order; with a filter or another sort active the neighbours on screen
    /// are not the neighbours in the sequence.
    fn can_reorder(&self) -> bool {
        !self.search_active && self.filter.is_empty() && self.sort == SortMode::Insertion
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// One-line summary of the active filters and sort mode.
    fn filter_summary(&self) -> String {
        let priority = self
            .filter
            .priority
            .map(format_priority)
            .unwrap_or("All");
        let category = self
            .filter
            .category
            .map(format_category)
            .unwrap_or("All");
        format!(
            "Status: {} | Priority: {} | Category: {} | Sort: {}",
            format_status_filter(self.filter.status),
            priority,
            category,
            format_sort_mode(self.sort)
        )
    }

    fn move_selected(&mut self, direction: Direction) {
        if !self.can_reorder() {
            self.set_status_message(
                "Reordering is only available in the unfiltered insertion view".to_string(),
            );
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };
        self.store.move_task(id, direction);
        self.refresh_view();
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        if self.search_active {
            match key {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.filter.search.clear();
                    self.input_mode = InputMode::None;
                    self.refresh_view();
                    self.clear_status_message();
                }
                KeyCode::Enter => {
                    self.search_active = false;
                    self.input_mode = InputMode::None;
                    if self.filter.search.is_empty() {
                        self.set_status_message("Search cleared".to_string());
                    } else {
                        self.set_status_message(format!(
                            "Search applied: '{}' ({} tasks)",
                            self.filter.search,
                            self.visible.len()
                        ));
                    }
                }
                KeyCode::Backspace => {
                    if !self.filter.search.is_empty() {
                        self.filter.search.pop();
                        self.refresh_view();
                    }
                }
                KeyCode::Char(c) => {
                    self.filter.search.push(c);
                    self.refresh_view();
                }
                _ => {}
            }
            return Ok(false);
        }

        match key {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Esc => {
                if !self.filter.search.is_empty() {
                    self.filter.search.clear();
                    self.refresh_view();
                    self.clear_status_message();
                } else {
                    return Ok(true);
                }
            }
            KeyCode::Char('q') => return Ok(true),

            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                } else if !self.visible.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.visible.len() {
                        self.list_state.select(Some(selected + 1));
                    }
                } else if !self.visible.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('K') => self.move_selected(Direction::Up),
            KeyCode::Char('J') => self.move_selected(Direction::Down),

            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    if let Some(task) = self.store.get(id) {
                        self.selected_task = Some(id);
                        self.form = TaskForm::from_task(task);
                        self.form.update_active_field();
                        self.state = AppState::EditTask;
                        self.input_mode = InputMode::Text;
                    }
                }
            }
            KeyCode::Char('a') => {
                self.form = TaskForm::new();
                self.form.update_active_field();
                self.state = AppState::AddTask;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.confirm_delete = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('c') | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.store.toggle_completion(id);
                    self.refresh_view();
                    let done = self.store.get(id).map(|t| t.completed).unwrap_or(false);
                    self.set_status_message(
                        if done {
                            "Task marked done"
                        } else {
                            "Task reopened"
                        }
                        .to_string(),
                    );
                }
            }
            KeyCode::Char('t') => {
                self.filter.status = cycle_status(self.filter.status);
                self.refresh_view();
                self.set_status_message(format!(
                    "Status filter: {} ({} visible)",
                    format_status_filter(self.filter.status),
                    self.visible.len()
                ));
            }
            KeyCode::Char('p') => {
                self.filter.priority = cycle_priority(self.filter.priority);
                self.refresh_view();
                self.set_status_message(format!(
                    "Priority filter: {} ({} visible)",
                    self.filter.priority.map(format_priority).unwrap_or("All"),
                    self.visible.len()
                ));
            }
            KeyCode::Char('g') => {
                self.filter.category = cycle_category(self.filter.category);
                self.refresh_view();
                self.set_status_message(format!(
                    "Category filter: {} ({} visible)",
                    self.filter.category.map(format_category).unwrap_or("All"),
                    self.visible.len()
                ));
            }
            KeyCode::Char('o') => {
                self.sort = cycle_sort(self.sort);
                self.refresh_view();
                self.set_status_message(format!("Sorted by {}", format_sort_mode(self.sort)));
            }
            KeyCode::Char('/') => {
                self.search_active = true;
                self.input_mode = InputMode::Text;
                self.set_status_message(
                    "Search mode: type to match task names, Enter to apply, Esc to cancel"
                        .to_string(),
                );
            }
            KeyCode::Char('x') => {
                self.path_input = InputField::with_value("tasks.csv");
                self.state = AppState::ExportPrompt;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('i') => {
                self.path_input = InputField::new();
                self.state = AppState::ImportPrompt;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('h') => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input when in the add or edit form.
    fn handle_form_input(&mut self, key: KeyCode, is_edit: bool) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => self.submit_form(is_edit),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Validate and apply the form, creating or updating a task.
    fn submit_form(&mut self, is_edit: bool) {
        if self.form.name.value.trim().is_empty() {
            self.set_status_message("Task name is required".to_string());
            return;
        }

        let due_raw = self.form.due.value.trim().to_string();
        let due = if due_raw.is_empty() {
            None
        } else {
            match parse_due_input(&due_raw) {
                Some(d) => Some(d),
                None => {
                    self.set_status_message(
                        "Unrecognised due date. Use YYYY-MM-DD, 'today', 'tomorrow', or 'in Nd'"
                            .to_string(),
                    );
                    return;
                }
            }
        };

        let name = self.form.name.value.trim().to_string();
        let priority = self.form.selected_priority();
        let category = self.form.selected_category();

        let result = if is_edit {
            match self.selected_task {
                Some(id) => self.store.update(
                    id,
                    TaskPatch {
                        name: Some(name),
                        priority: Some(priority),
                        category: Some(category),
                        due_date: due,
                        clear_due: due.is_none(),
                    },
                ),
                None => return,
            }
        } else {
            self.store.create(&name, priority, category, due).map(|_| ())
        };

        match result {
            Ok(()) => {
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
                self.refresh_view();
                self.set_status_message(
                    if is_edit { "Task updated" } else { "Task added" }.to_string(),
                );
            }
            Err(e) => self.set_status_message(format!("Error: {e}")),
        }
    }

    /// Handle keyboard input in the delete confirmation dialog.
    fn handle_confirm_input(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.confirm_delete.take() {
                    self.store.delete(id);
                    self.refresh_view();
                    self.set_status_message("Task deleted".to_string());
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the export/import path prompts.
    fn handle_prompt_input(&mut self, key: KeyCode, export: bool) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
            }
            KeyCode::Enter => {
                let path = PathBuf::from(self.path_input.value.trim());
                if path.as_os_str().is_empty() {
                    self.set_status_message("A file path is required".to_string());
                    return Ok(false);
                }
                let message = if export {
                    match codec::export_file(&self.store, &path) {
                        Ok(n) => format!("Exported {} task(s) to {}", n, path.display()),
                        Err(e) => format!("Export failed: {e}"),
                    }
                } else {
                    match codec::import_file(&mut self.store, &path) {
                        Ok(n) => {
                            self.list_state.select(None);
                            self.refresh_view();
                            format!("Imported {} task(s) from {}", n, path.display())
                        }
                        Err(e) => format!("Import failed: {e}"),
                    }
                };
                self.state = AppState::TaskList;
                self.input_mode = InputMode::None;
                self.set_status_message(message);
            }
            KeyCode::Backspace => self.path_input.handle_backspace(),
            KeyCode::Delete => self.path_input.handle_delete(),
            KeyCode::Left => self.path_input.move_cursor_left(),
            KeyCode::Right => self.path_input.move_cursor_right(),
            KeyCode::Char(c) => self.path_input.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Any key leaves the help screen.
    fn handle_help_input(&mut self, _key: KeyCode) -> io::Result<bool> {
        self.state = AppState::TaskList;
        Ok(false)
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.clear_status_message();

                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers)?,
                    AppState::AddTask => self.handle_form_input(key.code, false)?,
                    AppState::EditTask => self.handle_form_input(key.code, true)?,
                    AppState::Help => self.handle_help_input(key.code)?,
                    AppState::Confirm => self.handle_confirm_input(key.code)?,
                    AppState::ExportPrompt => self.handle_prompt_input(key.code, true)?,
                    AppState::ImportPrompt => self.handle_prompt_input(key.code, false)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render the main task list with the stats header.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let counts = self.store.counts();

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header_text = vec![Line::from(vec![
            Span::styled("TO-DO LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "Total: {}  Done: {}  Pending: {}",
                    counts.total, counts.completed, counts.pending
                ),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled(
                self.filter_summary(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let header_cells = ["ID", "Done", "Name", "Priority", "Category", "Due", "Created"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| {
                let due_str = format_due_relative(task.due_date, today);
                let created_str = Utc
                    .timestamp_opt(task.created_at, 0)
                    .single()
                    .map(|dt| dt.date_naive().to_string())
                    .unwrap_or_else(|| "-".into());

                let style = if task.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(priority_color(task.priority))
                };

                Row::new(vec![
                    Cell::from(task.id.to_string()),
                    Cell::from(if task.completed { "[x]" } else { "[ ]" }),
                    Cell::from(task.name.clone()),
                    Cell::from(format_priority(task.priority)),
                    Cell::from(format_category(task.category)),
                    Cell::from(due_str),
                    Cell::from(created_str),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),  // ID
            Constraint::Length(5),  // Done
            Constraint::Min(24),    // Name
            Constraint::Length(10), // Priority
            Constraint::Length(10), // Category
            Constraint::Length(10), // Due
            Constraint::Length(12), // Created
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                self.visible.len(),
                self.store.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[1], &mut self.list_state);
    }

    /// Render the add/edit form.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect, is_edit: bool) {
        let title = if is_edit { "Edit Task" } else { "Add Task" };
        let outer = centered_rect(70, 70, area);
        f.render_widget(Clear, outer);

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(outer);
        f.render_widget(block, outer);

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Due date
                Constraint::Length(3), // Priority
                Constraint::Length(3), // Category
                Constraint::Min(1),    // Instructions
            ])
            .split(inner);

        let field_block = |label: &'static str, active: bool| {
            let style = if active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(style)
        };

        let name = Paragraph::new(self.form.name.value.clone()).block(field_block(
            "Name",
            self.form.current_field == NAME_FIELD,
        ));
        f.render_widget(name, chunks[0]);

        let due = Paragraph::new(self.form.due.value.clone()).block(field_block(
            "Due date (YYYY-MM-DD, today, tomorrow, in Nd)",
            self.form.current_field == DUE_FIELD,
        ));
        f.render_widget(due, chunks[1]);

        let priority = Paragraph::new(format!(
            "< {} >",
            format_priority(self.form.selected_priority())
        ))
        .block(field_block(
            "Priority",
            self.form.current_field == PRIORITY_FIELD,
        ));
        f.render_widget(priority, chunks[2]);

        let category = Paragraph::new(format!(
            "< {} >",
            format_category(self.form.selected_category())
        ))
        .block(field_block(
            "Category",
            self.form.current_field == CATEGORY_FIELD,
        ));
        f.render_widget(category, chunks[3]);

        let instructions =
            Paragraph::new("Tab/Up/Down fields | Left/Right adjust | Enter save | Esc cancel")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
        f.render_widget(instructions, chunks[4]);

        let cursor_field = match self.form.current_field {
            NAME_FIELD => Some((chunks[0], &self.form.name)),
            DUE_FIELD => Some((chunks[1], &self.form.due)),
            _ => None,
        };
        if let Some((chunk, field)) = cursor_field {
            f.set_cursor_position((chunk.x + field.cursor as u16 + 1, chunk.y + 1));
        }
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "To-Do List Help",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Task List:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Up/k, Down/j   Navigate tasks"),
            Line::from("  K / J          Move task up / down (insertion view only)"),
            Line::from("  Enter/e        Edit selected task"),
            Line::from("  a              Add new task"),
            Line::from("  c/Space        Toggle completion"),
            Line::from("  d              Delete selected task"),
            Line::from("  t              Cycle status filter (All / Pending / Completed)"),
            Line::from("  p              Cycle priority filter"),
            Line::from("  g              Cycle category filter"),
            Line::from("  o              Cycle sort mode"),
            Line::from("  /              Search task names"),
            Line::from("  x              Export to .csv or .json"),
            Line::from("  i              Import from .csv or .json (replaces the list)"),
            Line::from("  h              Show this help"),
            Line::from("  q/Ctrl+C/Esc   Quit"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Form:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Tab/Up/Down    Navigate between fields"),
            Line::from("  Left/Right     Change priority/category selectors"),
            Line::from("  Enter          Save task"),
            Line::from("  Esc            Cancel and return"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Notes:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from("  Tasks live in memory for this session only."),
            Line::from("  Export before quitting to keep them; import replaces the whole list."),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the delete confirmation dialog.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(CONFIRM_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let name = self
            .confirm_delete
            .and_then(|id| self.store.get(id))
            .map(|t| t.name.clone())
            .unwrap_or_default();

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Delete this task?",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(name),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the export/import path prompt.
    fn render_prompt(&mut self, f: &mut Frame, area: Rect, export: bool) {
        let title = if export {
            "Export to file (.csv or .json)"
        } else {
            "Import from file (.csv or .json)"
        };

        let area = centered_rect(60, 20, area);
        f.render_widget(Clear, area);

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(inner);

        let input = Paragraph::new(self.path_input.value.clone())
            .block(Block::default().borders(Borders::ALL).title("Path"));
        f.render_widget(input, chunks[0]);

        let note = if export {
            "Enter to write the full list | Esc to cancel"
        } else {
            "Enter to replace the list with the file contents | Esc to cancel"
        };
        let instructions = Paragraph::new(note)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(instructions, chunks[1]);

        f.set_cursor_position((
            chunks[0].x + self.path_input.cursor as u16 + 1,
            chunks[0].y + 1,
        ));
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.search_active && self.input_mode == InputMode::Text {
            format!(
                "Search: {} (Esc to clear, Enter to confirm)",
                self.filter.search
            )
        } else if !self.filter.search.is_empty() {
            format!(
                "Tasks: {} (search '{}') | Press 'h' for help",
                self.visible.len(),
                self.filter.search
            )
        } else {
            match self.state {
                AppState::TaskList => {
                    format!("Tasks: {} | Press 'h' for help", self.visible.len())
                }
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
                AppState::ExportPrompt => "Export".to_string(),
                AppState::ImportPrompt => "Import".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function dispatching to the current view.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::AddTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0], false);
            }
            AppState::EditTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0], true);
            }
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
            AppState::ExportPrompt => {
                self.render_task_list(f, chunks[0]);
                self.render_prompt(f, chunks[0], true);
            }
            AppState::ImportPrompt => {
                self.render_task_list(f, chunks[0]);
                self.render_prompt(f, chunks[0], false);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

fn cycle_status(current: StatusFilter) -> StatusFilter {
    match current {
        StatusFilter::All => StatusFilter::Pending,
        StatusFilter::Pending => StatusFilter::Completed,
        StatusFilter::Completed => StatusFilter::All,
    }
}

fn cycle_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::Urgent),
        Some(Priority::Urgent) => Some(Priority::Important),
        Some(Priority::Important) => Some(Priority::Normal),
        Some(Priority::Normal) => None,
    }
}

fn cycle_category(current: Option<Category>) -> Option<Category> {
    match current {
        None => Some(Category::Work),
        Some(Category::Work) => Some(Category::Personal),
        Some(Category::Personal) => Some(Category::Study),
        Some(Category::Study) => Some(Category::Other),
        Some(Category::Other) => None,
    }
}

fn cycle_sort(current: SortMode) -> SortMode {
    match current {
        SortMode::Insertion => SortMode::Priority,
        SortMode::Priority => SortMode::DueDate,
        SortMode::DueDate => SortMode::Name,
        SortMode::Name => SortMode::Insertion,
    }
}
