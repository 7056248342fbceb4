//! Data model types for tool table conversion.

mod field;
mod preset;
mod tool;

pub use field::{Field, FieldKind};
pub use preset::{
    Passthrough, PresetDocument, PresetMetadata, PresetOffsets, PresetOrientation, ToolPreset,
};
pub use tool::{FieldValue, ToolEntry};
