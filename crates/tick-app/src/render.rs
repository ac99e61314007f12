//! Row rendering for the task list.

use std::fmt::Write;

use tick_core::Task;

/// Render tasks as one line per row: checkbox, id, description.
///
/// The output always ends with a newline; an empty list renders a
/// placeholder line instead of nothing.
pub fn render_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "no tasks\n".to_string();
    }
    let mut out = String::new();
    for task in tasks {
        let mark = if task.is_completed { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {:>4}  {}", task.id, task.description);
    }
    out
}
