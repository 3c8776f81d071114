//! TOON emitter: a depth-indexed printer over [`Value`].
//!
//! Encoding picks one of three presentations for every array:
//!
//! - **Inline**: every element is a scalar; the whole array shares the
//!   header's line: `tags[2]: reading,gaming`
//! - **Tabular**: every element is an object with the same keys in the
//!   same order and scalar values only; keys appear once in the header:
//!   `items[2]{sku,qty,price}:` followed by one row per line
//! - **List**: everything else, one `- ` item per line
//!
//! The classifier is pure and the printer is deterministic, so encoding a
//! freshly decoded document reproduces it byte for byte.

use crate::error::{Error, Result};
use crate::options::{Delimiter, ToonOptions};
use crate::scalar;
use crate::value::Value;

/// The presentation chosen for a sequence. Tabular carries the field order
/// taken from the first element.
#[derive(Debug, PartialEq)]
pub(crate) enum ArrayShape<'a> {
    Inline,
    Tabular(Vec<&'a str>),
    List,
}

/// Chooses the array presentation. Empty sequences are inline with count 0.
pub(crate) fn classify(items: &[Value]) -> ArrayShape<'_> {
    if items.iter().all(Value::is_scalar) {
        return ArrayShape::Inline;
    }
    if let Some(fields) = tabular_fields(items) {
        return ArrayShape::Tabular(fields);
    }
    ArrayShape::List
}

/// Returns the shared field order when every element is an object with the
/// same keys in the same order and scalar values throughout.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = match items.first() {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return None,
    };
    if !first.values().all(Value::is_scalar) {
        return None;
    }
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();
    for item in &items[1..] {
        let map = match item {
            Value::Object(map) => map,
            _ => return None,
        };
        if map.len() != fields.len() {
            return None;
        }
        for ((key, value), field) in map.iter().zip(&fields) {
            if key.as_str() != *field || !value.is_scalar() {
                return None;
            }
        }
    }
    Some(fields)
}

/// Encodes a value into a TOON document.
///
/// Fails with [`Error::InvalidOptions`] when `indent` is zero and the value
/// needs indented blocks, since the resulting text could not be decoded
/// unambiguously.
pub(crate) fn encode_value(value: &Value, options: &ToonOptions) -> Result<String> {
    if options.indent == 0 && needs_block(value) {
        return Err(Error::invalid_options(
            "an indent of zero cannot represent nested blocks",
        ));
    }
    let mut encoder = Encoder {
        out: String::with_capacity(256),
        indent: options.indent,
        delimiter: options.delimiter,
    };
    encoder.root(value);
    Ok(encoder.out)
}

/// Whether encoding `value` would emit any line below the root, which a
/// zero-indent document cannot express.
fn needs_block(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.values().any(|child| match child {
            Value::Object(nested) => !nested.is_empty(),
            Value::Array(items) => !matches!(classify(items), ArrayShape::Inline),
            _ => false,
        }),
        Value::Array(items) => !matches!(classify(items), ArrayShape::Inline),
        _ => false,
    }
}

struct Encoder {
    out: String,
    indent: usize,
    delimiter: Delimiter,
}

impl Encoder {
    fn delim(&self) -> char {
        self.delimiter.as_char()
    }

    fn push_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.indent {
            self.out.push(' ');
        }
    }

    fn root(&mut self, value: &Value) {
        match value {
            // An empty object at the root is the empty document.
            Value::Object(map) if map.is_empty() => {}
            Value::Object(map) => {
                for (i, (key, child)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.push('\n');
                    }
                    scalar::write_key(&mut self.out, key);
                    self.field_value(child, 1);
                }
            }
            Value::Array(items) => self.array(items, 1),
            other => {
                let delim = self.delim();
                scalar::write_scalar(&mut self.out, other, delim)
            }
        }
    }

    /// Writes the value part of an already-emitted `key`. Block children
    /// (nested object fields, list items, tabular rows) land at
    /// `child_depth`, which is one past the key's own depth except under
    /// the tabular-first-in-list rule.
    fn field_value(&mut self, value: &Value, child_depth: usize) {
        match value {
            // An empty object value is a bare `key:`; an empty array is
            // `key[0]:`, keeping the two kinds syntactically distinct.
            Value::Object(map) if map.is_empty() => self.out.push(':'),
            Value::Object(map) => {
                self.out.push(':');
                for (key, child) in map.iter() {
                    self.out.push('\n');
                    self.push_indent(child_depth);
                    scalar::write_key(&mut self.out, key);
                    self.field_value(child, child_depth + 1);
                }
            }
            Value::Array(items) => self.array(items, child_depth),
            other => {
                self.out.push_str(": ");
                let delim = self.delim();
                scalar::write_scalar(&mut self.out, other, delim);
            }
        }
    }

    /// Writes an array header continuing the current line, then its body
    /// with rows or items at `child_depth`.
    fn array(&mut self, items: &[Value], child_depth: usize) {
        let delim = self.delim();
        match classify(items) {
            ArrayShape::Inline => {
                self.count_header(items.len());
                self.out.push(':');
                if !items.is_empty() {
                    self.out.push(' ');
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            self.out.push(delim);
                        }
                        scalar::write_scalar(&mut self.out, item, delim);
                    }
                }
            }
            ArrayShape::Tabular(fields) => {
                self.count_header(items.len());
                self.out.push('{');
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push(delim);
                    }
                    scalar::write_key(&mut self.out, field);
                }
                self.out.push_str("}:");
                for item in items {
                    self.out.push('\n');
                    self.push_indent(child_depth);
                    if let Value::Object(map) = item {
                        for (i, field) in fields.iter().enumerate() {
                            if i > 0 {
                                self.out.push(delim);
                            }
                            let cell = map.get(field).unwrap_or(&Value::Null);
                            scalar::write_scalar(&mut self.out, cell, delim);
                        }
                    }
                }
            }
            ArrayShape::List => {
                self.count_header(items.len());
                self.out.push(':');
                for item in items {
                    self.out.push('\n');
                    self.push_indent(child_depth);
                    self.list_item(item, child_depth);
                }
            }
        }
    }

    /// Writes `[N]`, with the delimiter marker inside the brackets when the
    /// active delimiter is not the comma. The marker makes each document
    /// self-describing for the decoder.
    fn count_header(&mut self, count: usize) {
        self.out.push('[');
        self.out.push_str(&count.to_string());
        if self.delimiter != Delimiter::Comma {
            self.out.push(self.delim());
        }
        self.out.push(']');
    }

    /// Writes one list element after its indentation. Object elements put
    /// their first field on the hyphen line; that field's block children go
    /// two steps below the hyphen while sibling fields go one step below.
    fn list_item(&mut self, item: &Value, item_depth: usize) {
        match item {
            Value::Object(map) if map.is_empty() => self.out.push('-'),
            Value::Object(map) => {
                self.out.push_str("- ");
                let mut entries = map.iter();
                if let Some((first_key, first_value)) = entries.next() {
                    scalar::write_key(&mut self.out, first_key);
                    self.field_value(first_value, item_depth + 2);
                }
                for (key, value) in entries {
                    self.out.push('\n');
                    self.push_indent(item_depth + 1);
                    scalar::write_key(&mut self.out, key);
                    self.field_value(value, item_depth + 2);
                }
            }
            Value::Array(items) => {
                self.out.push_str("- ");
                self.array(items, item_depth + 1);
            }
            other => {
                self.out.push_str("- ");
                let delim = self.delim();
                scalar::write_scalar(&mut self.out, other, delim);
            }
        }
    }
}
