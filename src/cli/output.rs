//! CLI output: delta rendering and error mapping.

use crate::diff::Delta;
use crate::error::CliError;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Exit status when the compared trees are identical
pub const EXIT_UNCHANGED: i32 = 0;
/// Exit status when at least one change was found
pub const EXIT_CHANGED: i32 = 1;
/// Exit status for any error
pub const EXIT_ERROR: i32 = 2;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &CliError) -> String {
    format!("error: {}", e)
}

pub fn exit_code(changed: bool) -> i32 {
    if changed {
        EXIT_CHANGED
    } else {
        EXIT_UNCHANGED
    }
}

/// One line per change, grouped by kind
pub fn format_delta_text(delta: &Delta, color: bool) -> String {
    if !color {
        return delta.to_string().trim_end().to_string();
    }

    let mut out = String::new();
    for path in &delta.new_dirs {
        let _ = writeln!(out, "{} {}", "+d".green().bold(), path.green());
    }
    for path in &delta.removed_dirs {
        let _ = writeln!(out, "{} {}", "-d".red().bold(), path.red());
    }
    for path in &delta.new_files {
        let _ = writeln!(out, "{} {}", "+".green().bold(), path.green());
    }
    for path in &delta.removed_files {
        let _ = writeln!(out, "{} {}", "-".red().bold(), path.red());
    }
    for path in &delta.modified_files {
        let _ = writeln!(out, "{} {}", "~".yellow().bold(), path.yellow());
    }
    out.trim_end().to_string()
}

pub fn format_delta_json(delta: &Delta) -> Result<String, CliError> {
    serde_json::to_string_pretty(delta)
        .map_err(|e| CliError::Snapshot(crate::error::SnapshotError::Serialization(e)))
}
