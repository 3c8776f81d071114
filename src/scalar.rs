//! Scalar lexical rules: quoting, escaping, and number normalization.
//!
//! Both directions of the codec share this vocabulary. The encoder asks
//! [`is_safe_unquoted`] before emitting a bare string and escapes through
//! [`write_string`]; the decoder inverts those decisions token by token, so
//! every quoting choice made here has a matching branch in
//! [`parse_scalar_token`].

use crate::error::{Error, Result};
use crate::value::{Number, Value};

/// Characters that always force quoting, independent of the delimiter.
const STRUCTURAL: [char; 7] = [':', '[', ']', '{', '}', '"', '\\'];

/// Formats a finite float in plain positional decimal.
///
/// Rust's `Display` for `f64` already produces the shortest lossless
/// positional rendering for every finite double (never scientific
/// notation), so `1e6` comes out as `1000000` and `1e-6` as `0.000001`.
/// A `.0` suffix is added to whole floats so the integer/float distinction
/// survives decoding. Zero renders without a sign; non-finite values render
/// as `null`.
pub(crate) fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f == 0.0 {
        return "0.0".to_string();
    }
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

/// Tests whether `s` matches a decimal numeric literal: optional sign,
/// digits, optional fraction, optional exponent. This is the exact set of
/// tokens the decoder turns into numbers.
pub(crate) fn is_numeric_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return false;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Tests whether a bare `s` would collide with a non-string literal: the
/// keywords, any decimal numeric literal, or the reserved hex / binary /
/// leading-zero integer forms.
pub(crate) fn is_ambiguous_literal(s: &str) -> bool {
    if matches!(s, "true" | "false" | "null") {
        return true;
    }
    if is_numeric_literal(s) {
        return true;
    }
    if let Some(rest) = s.strip_prefix("0x") {
        if !rest.is_empty() && rest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return true;
        }
    }
    if let Some(rest) = s.strip_prefix("0b") {
        if !rest.is_empty() && rest.bytes().all(|b| matches!(b, b'0' | b'1')) {
            return true;
        }
    }
    false
}

/// The safe-unquoted predicate for string values under the active
/// delimiter. A string that fails any clause is emitted quoted.
pub(crate) fn is_safe_unquoted(s: &str, delimiter: char) -> bool {
    if s.is_empty() {
        return false;
    }
    let first = s.chars().next().unwrap();
    let last = s.chars().next_back().unwrap();
    if first.is_whitespace() || last.is_whitespace() {
        return false;
    }
    // Could be mistaken for a list item marker at line start.
    if s == "-" || s.starts_with("- ") {
        return false;
    }
    if is_ambiguous_literal(s) {
        return false;
    }
    s.chars().all(|ch| {
        ch != delimiter && !STRUCTURAL.contains(&ch) && (ch as u32) >= 0x20
    })
}

/// The stricter predicate for unquoted keys: `[_A-Za-z][_A-Za-z0-9.]*`.
pub(crate) fn is_safe_key(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Appends the escaped body of a quoted string.
fn escape_into(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

/// Appends a string value, quoted only when the predicate requires it.
pub(crate) fn write_string(out: &mut String, s: &str, delimiter: char) {
    if is_safe_unquoted(s, delimiter) {
        out.push_str(s);
    } else {
        out.push('"');
        escape_into(out, s);
        out.push('"');
    }
}

/// Appends an object key, quoted unless it is a safe identifier.
pub(crate) fn write_key(out: &mut String, key: &str) {
    if is_safe_key(key) {
        out.push_str(key);
    } else {
        out.push('"');
        escape_into(out, key);
        out.push('"');
    }
}

/// Appends a scalar value. Containers never reach this function; the shape
/// classifier keeps them out of scalar positions.
pub(crate) fn write_scalar(out: &mut String, value: &Value, delimiter: char) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(Number::Integer(i)) => out.push_str(&i.to_string()),
        Value::Number(Number::Float(f)) => out.push_str(&format_float(*f)),
        Value::String(s) => write_string(out, s, delimiter),
        Value::Array(_) | Value::Object(_) => out.push_str("null"),
    }
}

/// Interprets an unquoted token: exact lowercase keywords, then decimal
/// numeric literals, then plain text. Integer-form literals that overflow
/// `i64` fall back to floats; a float literal that overflows the double
/// range collapses to null, mirroring the normalizer.
pub(crate) fn parse_scalar_token(token: &str) -> Value {
    match token {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if is_numeric_literal(token) {
        let integral = !token.contains(|c| c == '.' || c == 'e' || c == 'E');
        if integral {
            if let Ok(i) = token.parse::<i64>() {
                return Value::Number(Number::Integer(i));
            }
        }
        if let Ok(f) = token.parse::<f64>() {
            return Value::from(f);
        }
    }
    Value::String(token.to_string())
}

/// Parses a quoted string starting at the opening `"` of `s`. Returns the
/// unescaped content and the byte length consumed, including both quotes.
/// Only `\\ \" \n \r \t` are valid escapes.
pub(crate) fn parse_quoted(s: &str, line: usize, column: usize) -> Result<(String, usize)> {
    debug_assert!(s.starts_with('"'));
    let mut out = String::new();
    let mut chars = s.char_indices().skip(1);
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => return Ok((out, i + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((j, other)) => {
                    return Err(Error::syntax(
                        line,
                        column + j,
                        format!("invalid escape sequence `\\{}`", other),
                    ));
                }
                None => {
                    return Err(Error::syntax(line, column + i, "unterminated escape sequence"));
                }
            },
            _ => out.push(ch),
        }
    }
    Err(Error::syntax(line, column, "unterminated string"))
}

/// Parses a whole scalar (the text after `key: `, a list element, or a bare
/// root value): a quoted string or a single unquoted token.
pub(crate) fn parse_scalar_text(s: &str, line: usize, column: usize) -> Result<Value> {
    if s.starts_with('"') {
        let (string, consumed) = parse_quoted(s, line, column)?;
        if consumed != s.len() {
            return Err(Error::syntax(
                line,
                column + consumed,
                "unexpected characters after quoted string",
            ));
        }
        return Ok(Value::String(string));
    }
    Ok(parse_scalar_token(s))
}

/// Splits a delimited body (an inline array or a tabular row) into scalar
/// values, respecting quoted strings. `column` is the column of the first
/// byte of `s`, used for error positions.
pub(crate) fn parse_delimited(
    s: &str,
    delimiter: char,
    line: usize,
    column: usize,
) -> Result<Vec<Value>> {
    let delim = delimiter as u8;
    let bytes = s.as_bytes();
    let mut values = Vec::new();
    let mut i = 0;
    loop {
        // Emitted text has no padding around delimiters; tolerate it in
        // handwritten documents.
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i >= bytes.len() {
            return Err(Error::syntax(line, column + i, "empty value in delimited list"));
        }
        if bytes[i] == b'"' {
            let (string, consumed) = parse_quoted(&s[i..], line, column + i)?;
            values.push(Value::String(string));
            i += consumed;
            while i < bytes.len() && bytes[i] == b' ' {
                i += 1;
            }
            if i == bytes.len() {
                return Ok(values);
            }
            if bytes[i] != delim {
                return Err(Error::syntax(
                    line,
                    column + i,
                    "expected delimiter after quoted value",
                ));
            }
            i += 1;
        } else {
            let end = s[i..]
                .bytes()
                .position(|b| b == delim)
                .map_or(s.len(), |p| p + i);
            let token = s[i..end].trim();
            if token.is_empty() {
                return Err(Error::syntax(line, column + i, "empty value in delimited list"));
            }
            values.push(parse_scalar_token(token));
            if end == s.len() {
                return Ok(values);
            }
            i = end + 1;
        }
    }
}
