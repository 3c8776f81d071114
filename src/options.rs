//! Configuration options for the TOON codec.
//!
//! A single [`ToonOptions`] record drives both directions. It is immutable
//! for the duration of an encode or decode call.
//!
//! - `indent`: spaces per nesting level (default 2). Zero produces a fully
//!   flattened document and is accepted by the encoder only when the value
//!   has no indented blocks; anything deeper is rejected before emission.
//! - `delimiter`: the single active delimiter separating inline array
//!   elements, tabular fields and tabular row values. One of comma
//!   (default), tab, or pipe.
//! - `strict`: decoder-only flag (default `true`) requiring declared array
//!   lengths to match the observed element counts.
//!
//! ## Examples
//!
//! ```rust
//! use toon::{encode_with_options, toon, Delimiter, ToonOptions};
//!
//! let value = toon!({ "tags": ["a,b", "c,d"] });
//! let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
//! // Commas stay unquoted because tab is the active delimiter.
//! assert_eq!(encode_with_options(&value, &options).unwrap(), "tags[2\t]: a,b\tc,d");
//! ```

/// The active delimiter for inline arrays and tabular rows.
///
/// Only the active delimiter forces quoting of values that contain it; the
/// two inactive ones pass through unquoted (tab being the exception, since
/// it is a control character and is always quoted inside values).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// The delimiter as a single character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The delimiter as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Options for a single encode or decode call.
///
/// ```rust
/// use toon::{Delimiter, ToonOptions};
///
/// let options = ToonOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Pipe)
///     .lenient();
/// assert_eq!(options.indent, 4);
/// assert!(!options.strict);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToonOptions {
    /// Spaces per indentation level.
    pub indent: usize,
    /// The document-wide active delimiter.
    pub delimiter: Delimiter,
    /// Whether the decoder enforces declared array lengths.
    pub strict: bool,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent: 2,
            delimiter: Delimiter::Comma,
            strict: true,
        }
    }
}

impl ToonOptions {
    /// Default options: two-space indent, comma delimiter, strict decoding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the active delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Disables strict length checking: the decoder takes the observed
    /// element count when it disagrees with a header.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Enables strict length checking (the default).
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ToonOptions::new();
        assert_eq!(options.indent, 2);
        assert_eq!(options.delimiter, Delimiter::Comma);
        assert!(options.strict);
    }

    #[test]
    fn builder_chains() {
        let options = ToonOptions::new()
            .with_indent(0)
            .with_delimiter(Delimiter::Tab)
            .lenient();
        assert_eq!(options.indent, 0);
        assert_eq!(options.delimiter, Delimiter::Tab);
        assert!(!options.strict);
        assert!(options.strict().strict);
    }

    #[test]
    fn delimiter_chars() {
        assert_eq!(Delimiter::Comma.as_char(), ',');
        assert_eq!(Delimiter::Tab.as_str(), "\t");
        assert_eq!(Delimiter::Pipe.as_char(), '|');
    }
}
