//! Shared utilities for CLI commands.

use std::fmt::Write;

/// Renders left-aligned columns separated by two spaces, with a rule under
/// the header. Trailing whitespace is trimmed from every line.
pub fn render_table<S: AsRef<str>>(columns: &[&str], rows: &[Vec<S>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.as_ref().chars().count());
        }
    }

    let mut output = String::new();
    push_line(&mut output, columns.iter().copied(), &widths);
    push_line(&mut output, widths.iter().map(|w| "─".repeat(*w)), &widths);
    for row in rows {
        push_line(&mut output, row.iter().map(AsRef::as_ref), &widths);
    }
    output
}

fn push_line<I, S>(output: &mut String, cells: I, widths: &[usize])
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (i, (cell, width)) in cells.into_iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", cell.as_ref());
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

/// "1 record" / "3 records".
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
