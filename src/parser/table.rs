//! Whole tool table parser.

use super::line::parse_tool_line;
use crate::error::{FormatError, Result, SyncError};
use crate::model::ToolEntry;
use std::collections::HashSet;
use std::path::Path;

/// Parse a complete tool table.
///
/// Entries are returned in file order. Blank and comment-only lines are
/// skipped. The first malformed line or repeated tool number aborts the
/// whole parse; line numbers in errors are 1-based.
pub fn parse_tool_table(content: &str) -> std::result::Result<Vec<ToolEntry>, FormatError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0usize;

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;

        let Some(entry) = parse_tool_line(line).map_err(|e| e.at_line(line_number))? else {
            tracing::trace!(line = line_number, "Skipping blank or comment line");
            skipped += 1;
            continue;
        };

        if !seen.insert(entry.tool_number) {
            return Err(FormatError::DuplicateToolNumber {
                tool_number: entry.tool_number,
                line: line_number,
            });
        }

        entries.push(entry);
    }

    tracing::debug!(entries = entries.len(), skipped, "Parsed tool table");

    Ok(entries)
}

/// Parse a tool table file from a path.
///
/// An empty file is a valid, empty table.
pub fn parse_tool_table_file(path: &Path) -> Result<Vec<ToolEntry>> {
    if !path.exists() {
        return Err(SyncError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    Ok(parse_tool_table(&content)?)
}
