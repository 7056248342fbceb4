//! Tool table line parser.

use crate::config::COMMENT_PREFIX;
use crate::error::FormatError;
use crate::model::{Field, FieldKind, FieldValue, ToolEntry};

/// A coded field and the literal that followed its letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldToken<'a> {
    pub field: Field,
    pub literal: &'a str,
}

/// Length of a run of ASCII digits at the start of `bytes`.
fn digits_len(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of a real literal `[+-]?digits[.digits]` at the start of `bytes`,
/// or 0 if there is none.
fn real_len(bytes: &[u8]) -> usize {
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int = digits_len(&bytes[sign..]);
    if int == 0 {
        return 0;
    }
    let mut len = sign + int;
    if bytes.get(len) == Some(&b'.') {
        len += 1;
        len += digits_len(&bytes[len..]);
    }
    len
}

/// The whitespace-delimited chunk starting at `start`, for error messages.
fn chunk_at(data: &str, start: usize) -> &str {
    let rest = &data[start..];
    let end = rest
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Scan the data part of a line for coded fields in a single pass.
///
/// Characters that do not start a field are skipped. Once a literal has been
/// read the scan resumes after it, so digits are never re-read as another
/// field. A `T` directly followed by anything other than a digit or
/// whitespace is rejected.
pub fn scan_fields(data: &str) -> Result<Vec<FieldToken<'_>>, FormatError> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let Some(field) = Field::from_code(char::from(bytes[pos])) else {
            pos += 1;
            continue;
        };

        let start = pos + 1;
        let len = match field.kind() {
            FieldKind::Integer => digits_len(&bytes[start..]),
            FieldKind::Real => real_len(&bytes[start..]),
        };

        if len == 0 {
            if field == Field::ToolNumber
                && bytes.get(start).is_some_and(|b| !b.is_ascii_whitespace())
            {
                return Err(FormatError::InvalidToolNumber {
                    token: chunk_at(data, pos).to_string(),
                });
            }
            pos += 1;
            continue;
        }

        tokens.push(FieldToken {
            field,
            literal: &data[start..start + len],
        });
        pos = start + len;
    }

    Ok(tokens)
}

/// Convert a scanned literal into a value for its field.
fn parse_value(token: &FieldToken<'_>) -> Result<FieldValue, FormatError> {
    let invalid = || match token.field {
        Field::ToolNumber => FormatError::InvalidToolNumber {
            token: format!("T{}", token.literal),
        },
        field => FormatError::InvalidValue {
            field: field.name(),
            token: format!("{}{}", field.code(), token.literal),
        },
    };

    match token.field.kind() {
        FieldKind::Integer => token
            .literal
            .parse::<u32>()
            .map(FieldValue::Integer)
            .map_err(|_| invalid()),
        FieldKind::Real => match token.literal.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(FieldValue::Real(v)),
            _ => Err(invalid()),
        },
    }
}

/// Parse a single tool table line.
///
/// Returns `Ok(None)` for blank lines and comment-only lines. Fields may
/// appear in any order; the first occurrence of a code wins and anything
/// unrecognised is ignored.
pub fn parse_tool_line(line: &str) -> Result<Option<ToolEntry>, FormatError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return Ok(None);
    }

    let (data, comment) = match line.split_once(COMMENT_PREFIX) {
        Some((data, comment)) => (data.trim(), comment.trim()),
        None => (line, ""),
    };

    let mut entry = ToolEntry::new(0).with_comment(comment);
    let mut tool_number = None;

    for token in scan_fields(data)? {
        let already_set = match token.field {
            Field::ToolNumber => tool_number.is_some(),
            field => entry.is_set(field),
        };
        if already_set {
            continue;
        }

        let value = parse_value(&token)?;
        if token.field == Field::ToolNumber {
            tool_number = value.as_u32();
        } else {
            entry.set(token.field, value);
        }
    }

    entry.tool_number = tool_number.ok_or(FormatError::MissingToolNumber)?;

    if let Some(diameter) = entry.diameter {
        if diameter < 0.0 {
            return Err(FormatError::NegativeDiameter { value: diameter });
        }
    }

    Ok(Some(entry))
}
