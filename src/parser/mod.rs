//! Tool table and INI parser module.

mod ini;
mod line;
mod table;

pub use ini::{parse_key_value, IniDocument};
pub use line::{parse_tool_line, scan_fields, FieldToken};
pub use table::{parse_tool_table, parse_tool_table_file};
