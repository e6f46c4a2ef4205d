//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Used for Urgent tasks
pub const URGENT_RED: Color = Color::Rgb(255, 68, 68);
/// Used for Important tasks
pub const IMPORTANT_AMBER: Color = Color::Rgb(255, 170, 0);
/// Used for Normal tasks
pub const NORMAL_GREEN: Color = Color::Rgb(68, 255, 68);
/// Background for the delete confirmation dialog
pub const CONFIRM_RED: Color = Color::Rgb(114, 0, 0);

/// Accent color for a task's priority.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Urgent => URGENT_RED,
        Priority::Important => IMPORTANT_AMBER,
        Priority::Normal => NORMAL_GREEN,
    }
}
