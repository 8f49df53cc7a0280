//! Character classes and value formatting shared by the parser and the writer.

/// First byte of a name: ASCII letter or `_`.
pub fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Subsequent name bytes: ASCII letters, digits and `_`.
pub fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Bytes allowed in an unquoted value.
pub fn is_value_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'-' | b'.')
}

/// Token separator inside a line.
pub fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

pub fn is_line_end(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// True when `value` can be written without quotes.
pub fn is_value_safe(value: &str) -> bool {
    value.bytes().all(is_value_char)
}

/// True when `name` would be accepted by the parser.
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) => is_name_start(first) && bytes.all(is_name_char),
        None => false,
    }
}

pub fn format_bool(val: bool) -> String {
    val.to_string()
}

pub fn format_int(val: i64) -> String {
    val.to_string()
}

/// Shortest text that parses back to exactly `val`.
pub fn format_float(val: f64) -> String {
    format!("{val:?}")
}
