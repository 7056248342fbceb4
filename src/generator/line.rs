//! Tool table line generator.

use crate::config::{COMMENT_PREFIX, DECIMAL_PLACES};
use crate::model::{Field, FieldValue, ToolEntry};

/// Format a real value with a fixed number of decimals and an explicit sign.
///
/// Values that round to zero are written as `+0.000000`, never with a minus
/// sign, so the output is stable when read back.
pub fn format_real(value: f64) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = DECIMAL_PLACES);
    let is_zero = formatted.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { '-' } else { '+' };
    format!("{}{}", sign, formatted)
}

/// Format one coded field, e.g. `P3` or `Z-41.031000`.
pub fn format_field(field: Field, value: FieldValue) -> String {
    match value {
        FieldValue::Integer(v) => format!("{}{}", field.code(), v),
        FieldValue::Real(v) => format!("{}{}", field.code(), format_real(v)),
    }
}

/// Generate a single tool table line.
///
/// Fields are written in canonical order. The pocket is always written and
/// defaults to `P0`. The result has no trailing newline.
pub fn generate_tool_line(entry: &ToolEntry) -> String {
    let mut line = String::new();

    for field in Field::ALL {
        let value = match (field, entry.get(field)) {
            (_, Some(value)) => value,
            (Field::Pocket, None) => FieldValue::Integer(0),
            (_, None) => continue,
        };
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&format_field(field, value));
    }

    if entry.has_comment() {
        line.push(' ');
        line.push(COMMENT_PREFIX);
        line.push_str(&entry.comment);
    }

    line
}
