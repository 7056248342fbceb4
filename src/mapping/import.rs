//! Tool table to preset conversion.

use crate::config::{Unit, PRESET_SOURCE};
use crate::error::Result;
use crate::model::{
    Passthrough, PresetMetadata, PresetOffsets, PresetOrientation, ToolEntry, ToolPreset,
};
use crate::parser::{parse_tool_table, parse_tool_table_file};
use std::path::Path;

impl ToolPreset {
    /// Build a preset for `machine_id` from a tool table entry.
    ///
    /// Offsets and the diameter are tagged as millimeters, the comment
    /// becomes the description, and every set field is copied into the
    /// passthrough bag.
    pub fn from_tool_entry(entry: &ToolEntry, machine_id: &str) -> Self {
        let mut offsets = PresetOffsets::default();
        for field in PresetOffsets::AXES {
            if let Some(value) = entry.get(field) {
                offsets.set(field, value.as_f64(), Unit::Millimeters);
            }
        }

        let orientation = PresetOrientation {
            kind: entry.orientation,
            front_angle: entry.front_angle,
            back_angle: entry.back_angle,
        };

        let metadata = PresetMetadata {
            source: Some(PRESET_SOURCE.to_string()),
            diameter: entry.diameter,
            diameter_unit: entry.diameter.map(|_| Unit::Millimeters),
            linuxcnc_data: Some(Passthrough::from_entry(entry)),
            ..Default::default()
        };

        Self {
            machine_id: Some(machine_id.to_string()),
            tool_number: entry.tool_number,
            pocket: entry.pocket,
            description: Some(entry.comment.clone()),
            offsets: (!offsets.is_empty()).then_some(offsets),
            orientation: (!orientation.is_empty()).then_some(orientation),
            metadata,
        }
    }
}

/// Convert parsed entries to presets, keeping their order.
pub fn entries_to_presets(entries: &[ToolEntry], machine_id: &str) -> Vec<ToolPreset> {
    entries
        .iter()
        .map(|entry| ToolPreset::from_tool_entry(entry, machine_id))
        .collect()
}

/// Parse tool table text into presets for `machine_id`.
pub fn import_tool_table(content: &str, machine_id: &str) -> Result<Vec<ToolPreset>> {
    let entries = parse_tool_table(content)?;
    let presets = entries_to_presets(&entries, machine_id);

    tracing::debug!(presets = presets.len(), machine_id, "Imported tool table");

    Ok(presets)
}

/// Parse a tool table file into presets for `machine_id`.
pub fn import_tool_table_file(path: &Path, machine_id: &str) -> Result<Vec<ToolPreset>> {
    let entries = parse_tool_table_file(path)?;
    Ok(entries_to_presets(&entries, machine_id))
}
