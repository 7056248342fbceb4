//! Whole tool table generator.

use super::line::generate_tool_line;
use crate::error::Result;
use crate::model::ToolEntry;
use std::path::Path;

/// Generate a complete tool table.
///
/// Entries are written in ascending tool number order whatever order they
/// are given in, one per line, without a trailing newline. An empty slice
/// yields an empty string.
pub fn generate_tool_table(entries: &[ToolEntry]) -> String {
    let mut sorted: Vec<&ToolEntry> = entries.iter().collect();
    sorted.sort_by_key(|entry| entry.tool_number);

    sorted
        .into_iter()
        .map(generate_tool_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate tool table file content: the canonical table followed by a
/// newline, or nothing for an empty table.
pub fn generate_tool_table_file(entries: &[ToolEntry]) -> String {
    let mut content = generate_tool_table(entries);
    if !content.is_empty() {
        content.push('\n');
    }
    content
}

/// Write a tool table file.
pub fn write_tool_table_file(path: &Path, entries: &[ToolEntry]) -> Result<()> {
    std::fs::write(path, generate_tool_table_file(entries))?;

    tracing::debug!(entries = entries.len(), "Wrote {}", path.display());

    Ok(())
}
