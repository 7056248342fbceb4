//! Preset to tool table conversion.

use crate::error::{FormatError, Result, SyncError};
use crate::generator::generate_tool_table;
use crate::model::{FieldValue, PresetDocument, PresetOffsets, ToolEntry, ToolPreset};
use std::collections::HashSet;

/// Collapse line breaks and surrounding whitespace so a description fits
/// on one tool table line.
fn single_line_comment(description: &str) -> String {
    description
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ToolPreset {
    /// Build a tool table entry from this preset.
    ///
    /// Values are converted to millimeters. A missing pocket defaults to the
    /// tool number and a missing description to `Tool <n>`. Passthrough data
    /// only fills fields the preset does not map itself.
    pub fn to_tool_entry(&self) -> Result<ToolEntry> {
        let mut entry = ToolEntry::new(self.tool_number);
        entry.pocket = Some(self.pocket.unwrap_or(self.tool_number));
        entry.comment = match &self.description {
            Some(description) => single_line_comment(description),
            None => format!("Tool {}", self.tool_number),
        };
        entry.diameter = self.metadata.diameter_mm();

        if let Some(offsets) = &self.offsets {
            for field in PresetOffsets::AXES {
                if let Some(value) = offsets.get_mm(field) {
                    entry.set(field, FieldValue::Real(value));
                }
            }
        }

        if let Some(orientation) = &self.orientation {
            entry.orientation = orientation.kind;
            entry.front_angle = orientation.front_angle;
            entry.back_angle = orientation.back_angle;
        }

        if let Some(passthrough) = &self.metadata.linuxcnc_data {
            passthrough.fill_unset(&mut entry);
        }

        if let Some(diameter) = entry.diameter {
            if diameter < 0.0 {
                return Err(FormatError::NegativeDiameter { value: diameter }.into());
            }
        }

        Ok(entry)
    }
}

/// Convert presets to entries, rejecting repeated tool numbers.
pub fn presets_to_entries(presets: &[ToolPreset]) -> Result<Vec<ToolEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(presets.len());

    for preset in presets {
        if !seen.insert(preset.tool_number) {
            return Err(SyncError::DuplicatePreset {
                tool_number: preset.tool_number,
            });
        }
        entries.push(preset.to_tool_entry()?);
    }

    Ok(entries)
}

/// Export presets as canonical tool table text (no trailing newline).
pub fn export_presets(presets: &[ToolPreset]) -> Result<String> {
    let entries = presets_to_entries(presets)?;

    tracing::debug!(presets = presets.len(), "Exporting presets");

    Ok(generate_tool_table(&entries))
}

/// Decode a JSON preset document (a list, `{"items": [...]}` or one preset)
/// into tool table entries.
pub fn preset_json_to_entries(json: &str) -> Result<Vec<ToolEntry>> {
    let document: PresetDocument = serde_json::from_str(json)?;
    presets_to_entries(&document.into_presets())
}

/// Export a JSON preset document as canonical tool table text.
pub fn export_preset_json(json: &str) -> Result<String> {
    let entries = preset_json_to_entries(json)?;

    tracing::debug!(entries = entries.len(), "Exporting preset document");

    Ok(generate_tool_table(&entries))
}
