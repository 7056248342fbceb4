//! Tool table generator module.

mod line;
mod table;

pub use line::{format_field, format_real, generate_tool_line};
pub use table::{generate_tool_table, generate_tool_table_file, write_tool_table_file};
