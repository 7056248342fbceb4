//! Conversion between tool table entries and Smooth tool presets.

mod export;
mod import;

pub use export::{export_preset_json, export_presets, preset_json_to_entries, presets_to_entries};
pub use import::{entries_to_presets, import_tool_table, import_tool_table_file};
