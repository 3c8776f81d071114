//! # toon
//!
//! An encoder and decoder for TOON (Token-Oriented Object Notation), a
//! compact, indentation-structured text format for JSON-equivalent data.
//! TOON systematically drops the structural tokens JSON repeats (braces,
//! brackets, per-row keys, most quotes), which makes it markedly cheaper to
//! push through an LLM tokenizer while staying human-readable and
//! losslessly round-trippable.
//!
//! ## Format at a glance
//!
//! Objects are `key: value` lines, nested by indentation:
//!
//! ```text
//! name: Alice
//! active: true
//! address:
//!   city: Basel
//! ```
//!
//! Arrays carry their length in a bracketed header and take one of three
//! shapes. Scalar-only arrays are **inline**:
//!
//! ```text
//! tags[2]: reading,gaming
//! ```
//!
//! Arrays of uniform objects (same keys, same order, scalar values) are
//! **tabular**; keys appear once and rows carry only values:
//!
//! ```text
//! items[2]{sku,qty,price}:
//!   A1,2,9.99
//!   B2,1,14.5
//! ```
//!
//! Everything else is a **list** with `- ` markers:
//!
//! ```text
//! items[2]:
//!   - id: 1
//!     name: First
//!   - id: 2
//!     name: Second
//!     extra: true
//! ```
//!
//! Strings are unquoted unless they would be ambiguous (keywords, numeric
//! shapes, structural characters, the active delimiter, surrounding
//! whitespace). The decoder verifies declared lengths in strict mode (the
//! default) and tolerates mismatches in lenient mode.
//!
//! ## Quick start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice\nactive: true");
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Working with dynamic values
//!
//! ```rust
//! use toon::{decode, encode, toon};
//!
//! let value = toon!({
//!     "items": [
//!         { "sku": "A1", "qty": 2, "price": 9.99 },
//!         { "sku": "B2", "qty": 1, "price": 14.5 }
//!     ]
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "items[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! ## Options
//!
//! [`ToonOptions`] selects the indent width, the active delimiter (comma,
//! tab, or pipe), and strict or lenient decoding. Encode and decode are
//! pure, synchronous functions without shared state; values are borrowed by
//! the encoder and owned by the caller after decoding.

pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
mod scalar;
pub mod ser;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use error::{Error, Result};
pub use map::ToonMap;
pub use options::{Delimiter, ToonOptions};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Encodes a [`Value`] into a TOON document with default options.
///
/// ```rust
/// use toon::{encode, toon};
///
/// let value = toon!({ "tags": ["reading", "gaming"] });
/// assert_eq!(encode(&value).unwrap(), "tags[2]: reading,gaming");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] via [`encode_with_options`] rules; with
/// default options encoding a `Value` cannot fail.
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &ToonOptions::default())
}

/// Encodes a [`Value`] into a TOON document.
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] when `indent` is zero and the value
/// needs indented blocks.
pub fn encode_with_options(value: &Value, options: &ToonOptions) -> Result<String> {
    encoder::encode_value(value, options)
}

/// Decodes a TOON document into a [`Value`] with default options.
///
/// ```rust
/// use toon::{decode, toon};
///
/// let value = decode("tags[2]: reading,gaming").unwrap();
/// assert_eq!(value, toon!({ "tags": ["reading", "gaming"] }));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for malformed text and
/// [`Error::CountMismatch`] when a declared array length disagrees with the
/// document (strict mode).
pub fn decode(input: &str) -> Result<Value> {
    decode_with_options(input, &ToonOptions::default())
}

/// Decodes a TOON document into a [`Value`].
///
/// # Errors
///
/// See [`decode`]; with `strict` disabled, length mismatches are tolerated
/// and the observed counts win.
pub fn decode_with_options(input: &str, options: &ToonOptions) -> Result<Value> {
    decoder::decode_value(input, options)
}

/// Serializes any `T: Serialize` to a TOON string.
///
/// # Errors
///
/// Returns an error when the value cannot be normalized (for example a map
/// with non-string keys).
#[must_use = "this returns the encoded document, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &ToonOptions::default())
}

/// Serializes any `T: Serialize` to a TOON string with custom options.
///
/// ```rust
/// use toon::{to_string_with_options, Delimiter, ToonOptions};
///
/// let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
/// let text = to_string_with_options(&vec![1, 2, 3], &options).unwrap();
/// assert_eq!(text, "[3|]: 1|2|3");
/// ```
///
/// # Errors
///
/// Returns an error when normalization fails or the options cannot express
/// the value (zero indent with nesting).
#[must_use = "this returns the encoded document, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &ToonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    encode_with_options(&value, options)
}

/// Normalizes any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Returns an error when the value cannot be normalized.
#[must_use = "this returns the normalized value, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Deserializes a `T` from a TOON string.
///
/// ```rust
/// use serde::Deserialize;
/// use toon::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error when the input is not valid TOON or does not match `T`.
#[must_use = "this returns the deserialized value, errors must be handled"]
pub fn from_str<T>(input: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(input, &ToonOptions::default())
}

/// Deserializes a `T` from a TOON string with custom options.
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the deserialized value, errors must be handled"]
pub fn from_str_with_options<T>(input: &str, options: &ToonOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_with_options(input, options)?)
}

/// Serializes `value` as TOON into `writer`.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &ToonOptions::default())
}

/// Serializes `value` as TOON into `writer` with custom options.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &ToonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes()).map_err(Error::io)
}

/// Deserializes a `T` from a reader of TOON text.
///
/// # Errors
///
/// Returns an error when the read fails, the input is not valid TOON, or it
/// does not match `T`.
#[must_use = "this returns the deserialized value, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut input = String::new();
    reader.read_to_string(&mut input).map_err(Error::io)?;
    from_str(&input)
}

/// Deserializes a `T` from TOON bytes, which must be valid UTF-8.
///
/// # Errors
///
/// Returns an error on invalid UTF-8, invalid TOON, or a type mismatch.
#[must_use = "this returns the deserialized value, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let input = std::str::from_utf8(bytes)
        .map_err(|e| Error::UnsupportedValue(format!("input is not valid UTF-8: {}", e)))?;
    from_str(input)
}
