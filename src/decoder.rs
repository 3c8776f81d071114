//! TOON parser: lines → depth → headers → values.
//!
//! Decoding runs in two passes. Pass one splits the document into physical
//! lines and turns leading spaces into a depth (`spaces / indent`); pass two
//! recurses over the annotated lines, dispatching on what each line starts
//! with:
//!
//! - `key:` and nothing else: an object block follows on deeper lines
//! - `key[N]…:`: an array whose shape is read off the header
//! - `- ` at the expected depth: a list element
//! - anything else: a `key: scalar` line
//!
//! Array headers are parsed by a small character-level state machine; the
//! count they declare is authoritative and, in strict mode (the default),
//! must match the observed number of elements or rows.

use crate::error::{Error, Result};
use crate::options::{Delimiter, ToonOptions};
use crate::scalar;
use crate::value::Value;
use crate::ToonMap;

/// One physical line with its indentation resolved to a depth.
#[derive(Clone, Copy)]
struct Line<'a> {
    /// 1-based line number in the input.
    number: usize,
    /// Indentation depth: leading spaces divided by the indent width.
    depth: usize,
    /// Leading space count, for error columns.
    columns: usize,
    /// Content with indentation and trailing whitespace removed.
    text: &'a str,
}

impl Line<'_> {
    /// 1-based column of a byte offset into `text`.
    fn column(&self, offset: usize) -> usize {
        self.columns + offset + 1
    }
}

/// Decodes a TOON document into a [`Value`].
pub(crate) fn decode_value(input: &str, options: &ToonOptions) -> Result<Value> {
    let lines = split_lines(input, options)?;
    let mut parser = Parser {
        lines,
        pos: 0,
        strict: options.strict,
    };
    parser.parse_document()
}

/// Pass one: split into lines, drop blank lines, resolve depths.
fn split_lines<'a>(input: &'a str, options: &ToonOptions) -> Result<Vec<Line<'a>>> {
    let mut lines = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        let bytes = raw.as_bytes();
        let mut spaces = 0;
        while spaces < bytes.len() && bytes[spaces] == b' ' {
            spaces += 1;
        }
        if spaces < bytes.len() && bytes[spaces] == b'\t' {
            return Err(Error::syntax(number, spaces + 1, "tab used in indentation"));
        }
        let text = raw[spaces..].trim_end();
        if text.is_empty() {
            continue;
        }
        let depth = if options.indent == 0 {
            if spaces > 0 && options.strict {
                return Err(Error::syntax(
                    number,
                    1,
                    "indented line in a zero-indent document",
                ));
            }
            0
        } else {
            if options.strict && spaces % options.indent != 0 {
                return Err(Error::syntax(
                    number,
                    spaces + 1,
                    format!(
                        "indentation of {} columns is not a multiple of {}",
                        spaces, options.indent
                    ),
                ));
            }
            spaces / options.indent
        };
        lines.push(Line {
            number,
            depth,
            columns: spaces,
            text,
        });
    }
    Ok(lines)
}

/// A parsed array header: `[N]`, `[N<delim>]`, or `[N]{fields}`, plus
/// whatever followed the terminating colon on the same line.
#[derive(Debug)]
struct Header<'a> {
    count: usize,
    /// Delimiter for this array's body. `None` means no marker was present
    /// and the body inherits the document delimiter (comma).
    delimiter: Option<Delimiter>,
    /// Field names for tabular arrays.
    fields: Option<Vec<String>>,
    /// Text after the `:`, empty unless the array is inline.
    body: &'a str,
    /// Line the header appeared on.
    line: usize,
    /// Column of the first body byte.
    body_column: usize,
}

impl Header<'_> {
    fn body_delimiter(&self) -> Delimiter {
        self.delimiter.unwrap_or(Delimiter::Comma)
    }
}

/// Parses an array header beginning at `offset` in `line.text`, where a
/// `[` is known to sit. Any `#` inside the brackets (the retired
/// length-marker form) is rejected outright.
fn parse_header<'a>(line: Line<'a>, offset: usize) -> Result<Header<'a>> {
    let text = &line.text[offset..];
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.first(), Some(&b'['));
    let mut i = 1;

    let digit_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digit_start {
        let msg = if bytes.get(i) == Some(&b'#') {
            "length marker `#` is not allowed in array headers"
        } else {
            "expected array length after `[`"
        };
        return Err(Error::syntax(line.number, line.column(offset + i), msg));
    }
    let count: usize = text[digit_start..i]
        .parse()
        .map_err(|_| Error::syntax(line.number, line.column(offset + digit_start), "array length out of range"))?;

    let mut delimiter = match bytes.get(i) {
        Some(b'\t') => {
            i += 1;
            Some(Delimiter::Tab)
        }
        Some(b'|') => {
            i += 1;
            Some(Delimiter::Pipe)
        }
        _ => None,
    };

    match bytes.get(i) {
        Some(b']') => i += 1,
        Some(b'#') => {
            return Err(Error::syntax(
                line.number,
                line.column(offset + i),
                "length marker `#` is not allowed in array headers",
            ));
        }
        _ => {
            return Err(Error::syntax(
                line.number,
                line.column(offset + i),
                "expected `]` in array header",
            ));
        }
    }

    let mut fields = None;
    if bytes.get(i) == Some(&b'{') {
        let list_start = i + 1;
        let list_end = find_closing_brace(text, list_start).ok_or_else(|| {
            Error::syntax(line.number, line.column(offset + i), "unclosed field list")
        })?;
        let raw = &text[list_start..list_end];
        let field_delimiter = delimiter.unwrap_or_else(|| detect_field_delimiter(raw));
        let names = split_fields(raw, field_delimiter.as_char(), line, offset + list_start)?;
        if names.is_empty() {
            return Err(Error::syntax(
                line.number,
                line.column(offset + i),
                "empty field list in array header",
            ));
        }
        fields = Some(names);
        // The field list fixes the delimiter for the rows.
        delimiter = Some(field_delimiter);
        i = list_end + 1;
    }

    if bytes.get(i) != Some(&b':') {
        return Err(Error::syntax(
            line.number,
            line.column(offset + i),
            "expected `:` after array header",
        ));
    }
    i += 1;

    Ok(Header {
        count,
        delimiter,
        fields,
        body: &text[i..],
        line: line.number,
        body_column: line.column(offset + i),
    })
}

/// Finds the `}` closing a field list, skipping quoted field names.
fn find_closing_brace(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = start;
    let mut in_quotes = false;
    let mut escaped = false;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_quotes = false;
            }
        } else if b == b'"' {
            in_quotes = true;
        } else if b == b'}' {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Infers the delimiter a marker-less tabular header was written with by
/// looking for an unquoted tab or pipe in the raw field list.
fn detect_field_delimiter(raw: &str) -> Delimiter {
    let bytes = raw.as_bytes();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut saw_pipe = false;
    for &b in bytes {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_quotes = false;
            }
        } else if b == b'"' {
            in_quotes = true;
        } else if b == b'\t' {
            return Delimiter::Tab;
        } else if b == b'|' {
            saw_pipe = true;
        }
    }
    if saw_pipe {
        Delimiter::Pipe
    } else {
        Delimiter::Comma
    }
}

/// Splits a field list into key names (quoted names are unescaped, unquoted
/// names taken verbatim).
fn split_fields(raw: &str, delimiter: char, line: Line<'_>, offset: usize) -> Result<Vec<String>> {
    let delim = delimiter as u8;
    let bytes = raw.as_bytes();
    let mut names = Vec::new();
    if raw.is_empty() {
        return Ok(names);
    }
    let mut i = 0;
    loop {
        if i >= bytes.len() {
            return Err(Error::syntax(
                line.number,
                line.column(offset + i),
                "empty field name in array header",
            ));
        }
        if bytes[i] == b'"' {
            let (name, consumed) =
                scalar::parse_quoted(&raw[i..], line.number, line.column(offset + i))?;
            names.push(name);
            i += consumed;
            if i == bytes.len() {
                return Ok(names);
            }
            if bytes[i] != delim {
                return Err(Error::syntax(
                    line.number,
                    line.column(offset + i),
                    "expected delimiter after quoted field name",
                ));
            }
            i += 1;
        } else {
            let end = raw[i..]
                .bytes()
                .position(|b| b == delim)
                .map_or(raw.len(), |p| p + i);
            let name = raw[i..end].trim();
            if name.is_empty() {
                return Err(Error::syntax(
                    line.number,
                    line.column(offset + i),
                    "empty field name in array header",
                ));
            }
            names.push(name.to_string());
            if end == raw.len() {
                return Ok(names);
            }
            i = end + 1;
        }
    }
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    strict: bool,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn parse_document(&mut self) -> Result<Value> {
        if self.lines.is_empty() {
            return Ok(Value::Object(ToonMap::new()));
        }
        let first = self.lines[0];
        let value = if first.text.starts_with('[') {
            let header = parse_header(first, 0)?;
            self.advance();
            self.array_body(header, 1)?
        } else if self.lines.len() == 1 && !is_key_line(first.text) {
            scalar::parse_scalar_text(first.text, first.number, first.column(0))?
        } else {
            Value::Object(self.object_block(0)?)
        };
        if let Some(extra) = self.peek() {
            return Err(Error::syntax(
                extra.number,
                extra.column(0),
                "unexpected content after document root",
            ));
        }
        Ok(value)
    }

    /// Parses consecutive `key: …` entries at exactly `depth`.
    fn object_block(&mut self, depth: usize) -> Result<ToonMap> {
        let mut map = ToonMap::new();
        while let Some(line) = self.peek() {
            if line.depth < depth {
                break;
            }
            if line.depth > depth {
                return Err(Error::syntax(
                    line.number,
                    line.column(0),
                    "unexpected indentation",
                ));
            }
            if line.text == "-" || line.text.starts_with("- ") {
                return Err(Error::syntax(
                    line.number,
                    line.column(0),
                    "unexpected list item; array values require a `[N]` header",
                ));
            }
            let (key, rest, rest_offset) = split_key(line, 0)?;
            let value = self.entry_value(line, rest, rest_offset, depth + 1)?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Parses the value of a `key` whose remainder of the line is `rest`.
    /// Block children (nested fields, rows, list items) are expected at
    /// `child_depth`.
    fn entry_value(
        &mut self,
        line: Line<'a>,
        rest: &'a str,
        rest_offset: usize,
        child_depth: usize,
    ) -> Result<Value> {
        if rest.starts_with('[') {
            let header = parse_header(line, rest_offset)?;
            self.advance();
            return self.array_body(header, child_depth);
        }
        if rest == ":" {
            self.advance();
            if let Some(next) = self.peek() {
                if next.depth >= child_depth {
                    return Ok(Value::Object(self.object_block(child_depth)?));
                }
            }
            // Nothing deeper follows: an empty object.
            return Ok(Value::Object(ToonMap::new()));
        }
        if let Some(value_text) = rest.strip_prefix(": ") {
            let value =
                scalar::parse_scalar_text(value_text, line.number, line.column(rest_offset + 2))?;
            self.advance();
            return Ok(value);
        }
        Err(Error::syntax(
            line.number,
            line.column(rest_offset),
            "expected `:` after key",
        ))
    }

    /// Reads an array body after its header has been consumed. Dispatches
    /// on the header: field list → tabular rows, same-line body → inline,
    /// otherwise → `- ` list items.
    fn array_body(&mut self, header: Header<'a>, child_depth: usize) -> Result<Value> {
        if let Some(fields) = &header.fields {
            if !header.body.is_empty() {
                return Err(Error::syntax(
                    header.line,
                    header.body_column,
                    "unexpected content after tabular header",
                ));
            }
            return self.tabular_rows(&header, fields, child_depth);
        }

        if !header.body.is_empty() {
            let body = header.body.strip_prefix(' ').ok_or_else(|| {
                Error::syntax(header.line, header.body_column, "expected space after `:`")
            })?;
            let values = scalar::parse_delimited(
                body,
                header.body_delimiter().as_char(),
                header.line,
                header.body_column + 1,
            )?;
            if self.strict && values.len() != header.count {
                return Err(Error::count_mismatch(header.line, header.count, values.len()));
            }
            return Ok(Value::Array(values));
        }

        self.list_items(&header, child_depth)
    }

    fn tabular_rows(
        &mut self,
        header: &Header<'a>,
        fields: &[String],
        child_depth: usize,
    ) -> Result<Value> {
        let delim = header.body_delimiter().as_char();
        let mut rows = Vec::new();
        while let Some(line) = self.peek() {
            if line.depth < child_depth {
                break;
            }
            if line.depth > child_depth {
                return Err(Error::syntax(
                    line.number,
                    line.column(0),
                    "unexpected indentation in table rows",
                ));
            }
            let values = scalar::parse_delimited(line.text, delim, line.number, line.column(0))?;
            if values.len() != fields.len() {
                return Err(Error::syntax(
                    line.number,
                    line.column(0),
                    format!(
                        "row has {} values but the header declares {} fields",
                        values.len(),
                        fields.len()
                    ),
                ));
            }
            let mut map = ToonMap::with_capacity(fields.len());
            for (field, value) in fields.iter().zip(values) {
                map.insert(field.clone(), value);
            }
            rows.push(Value::Object(map));
            self.advance();
        }
        if self.strict && rows.len() != header.count {
            return Err(Error::count_mismatch(header.line, header.count, rows.len()));
        }
        Ok(Value::Array(rows))
    }

    fn list_items(&mut self, header: &Header<'a>, child_depth: usize) -> Result<Value> {
        let mut items = Vec::new();
        while let Some(line) = self.peek() {
            if line.depth < child_depth {
                break;
            }
            if line.depth > child_depth {
                return Err(Error::syntax(
                    line.number,
                    line.column(0),
                    "unexpected indentation in list",
                ));
            }
            if line.text != "-" && !line.text.starts_with("- ") {
                break;
            }
            items.push(self.list_element(line, child_depth)?);
        }
        if self.strict && items.len() != header.count {
            return Err(Error::count_mismatch(header.line, header.count, items.len()));
        }
        Ok(Value::Array(items))
    }

    /// Parses one `- ` element. Object elements carry their first field on
    /// the hyphen line; that field's block children sit two depths below
    /// the hyphen and sibling fields one depth below.
    fn list_element(&mut self, line: Line<'a>, item_depth: usize) -> Result<Value> {
        if line.text == "-" {
            self.advance();
            return Ok(Value::Object(ToonMap::new()));
        }
        let content = &line.text[2..];

        // A bare nested array: `- [N]…`
        if content.starts_with('[') {
            let header = parse_header(line, 2)?;
            self.advance();
            return self.array_body(header, item_depth + 1);
        }

        // A quoted scalar element, or a quoted key starting an object.
        if content.starts_with('"') {
            let (_, consumed) = scalar::parse_quoted(content, line.number, line.column(2))?;
            if consumed == content.len() {
                let value = scalar::parse_scalar_text(content, line.number, line.column(2))?;
                self.advance();
                return Ok(value);
            }
            return self.keyed_list_element(line, item_depth);
        }

        // Unquoted: a `key:`/`key[` split means an object, else a scalar.
        if content.find(|c| c == ':' || c == '[').is_some() {
            return self.keyed_list_element(line, item_depth);
        }
        let value = scalar::parse_scalar_text(content, line.number, line.column(2))?;
        self.advance();
        Ok(value)
    }

    fn keyed_list_element(&mut self, line: Line<'a>, item_depth: usize) -> Result<Value> {
        let (key, rest, rest_offset) = split_key(line, 2)?;
        let first_value = self.entry_value(line, rest, rest_offset, item_depth + 2)?;
        let mut map = ToonMap::new();
        map.insert(key, first_value);
        let siblings = self.object_block(item_depth + 1)?;
        for (key, value) in siblings {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}

/// Splits `key: …` or `key[…` starting at `offset`, returning the key, the
/// remainder beginning at `:` or `[`, and the remainder's byte offset.
fn split_key<'a>(line: Line<'a>, offset: usize) -> Result<(String, &'a str, usize)> {
    let text = &line.text[offset..];
    if text.starts_with('"') {
        let (key, consumed) = scalar::parse_quoted(text, line.number, line.column(offset))?;
        return Ok((key, &text[consumed..], offset + consumed));
    }
    let end = text
        .find(|c| c == ':' || c == '[')
        .ok_or_else(|| Error::syntax(line.number, line.column(offset), "expected `:` after key"))?;
    if end == 0 {
        return Err(Error::syntax(line.number, line.column(offset), "missing key"));
    }
    let key = text[..end].trim_end();
    Ok((key.to_string(), &text[end..], offset + end))
}

/// Whether a single line reads as `key: …`/`key[…` rather than a bare
/// scalar. Used only for root dispatch.
fn is_key_line(text: &str) -> bool {
    if text.starts_with('"') {
        return match scalar::parse_quoted(text, 1, 1) {
            Ok((_, consumed)) => matches!(text.as_bytes().get(consumed), Some(b':') | Some(b'[')),
            Err(_) => false,
        };
    }
    matches!(text.find(|c| c == ':' || c == '['), Some(end) if end > 0)
}
