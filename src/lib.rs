//! tbl-sync - LinuxCNC tool table conversion.
//!
//! This library reads and writes LinuxCNC tool tables (`*.tbl`) and converts
//! them to and from the tool presets used by the Smooth tool management
//! service.
//!
//! # Example
//!
//! ```
//! use tbl_sync::{generate_tool_table, parse_tool_table};
//!
//! let entries = parse_tool_table("T3 P0 D+6.0 ;Endmill\nT1 P0 D+2.9972 ;Probe").unwrap();
//! assert_eq!(entries[0].tool_number, 3);
//!
//! let canonical = generate_tool_table(&entries);
//! assert_eq!(
//!     canonical,
//!     "T1 P0 D+2.997200 ;Probe\nT3 P0 D+6.000000 ;Endmill"
//! );
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod model;
pub mod parser;

// Re-exports for convenience
pub use config::{SmoothConfig, Unit};
pub use error::{ErrorCode, FormatError, Result, SyncError};
pub use generator::{generate_tool_line, generate_tool_table, write_tool_table_file};
pub use mapping::{export_preset_json, export_presets, import_tool_table, import_tool_table_file};
pub use model::{Field, FieldValue, PresetDocument, ToolEntry, ToolPreset};
pub use parser::{parse_tool_line, parse_tool_table, parse_tool_table_file};

