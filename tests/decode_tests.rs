//! Decoder behavior: shape dispatch, strict counts, and error reporting.

use toon::{decode, decode_with_options, toon, Error, ToonOptions, Value};

fn lenient() -> ToonOptions {
    ToonOptions::new().lenient()
}

#[test]
fn decodes_the_three_array_shapes() {
    assert_eq!(
        decode("tags[2]: reading,gaming").unwrap(),
        toon!({ "tags": ["reading", "gaming"] })
    );

    assert_eq!(
        decode("items[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5").unwrap(),
        toon!({
            "items": [
                { "sku": "A1", "qty": 2, "price": 9.99 },
                { "sku": "B2", "qty": 1, "price": 14.5 }
            ]
        })
    );

    assert_eq!(
        decode("items[2]:\n  - id: 1\n    name: First\n  - id: 2\n    name: Second\n    extra: true")
            .unwrap(),
        toon!({
            "items": [
                { "id": 1, "name": "First" },
                { "id": 2, "name": "Second", "extra": true }
            ]
        })
    );
}

#[test]
fn tabular_first_in_list() {
    let text = "items[1]:\n  - users[2]{id,name}:\n      1,Ada\n      2,Bob\n    status: active";
    assert_eq!(
        decode(text).unwrap(),
        toon!({
            "items": [
                {
                    "users": [
                        { "id": 1, "name": "Ada" },
                        { "id": 2, "name": "Bob" }
                    ],
                    "status": "active"
                }
            ]
        })
    );
}

#[test]
fn root_forms() {
    assert_eq!(decode("").unwrap(), toon!({}));
    assert_eq!(decode("null").unwrap(), Value::Null);
    assert_eq!(decode("true").unwrap(), Value::Bool(true));
    assert_eq!(decode("True").unwrap(), Value::from("True"));
    assert_eq!(decode("42").unwrap(), Value::from(42));
    assert_eq!(decode("9.5").unwrap(), Value::from(9.5));
    assert_eq!(decode("hello world").unwrap(), Value::from("hello world"));
    assert_eq!(decode("\"42\"").unwrap(), Value::from("42"));
    assert_eq!(decode("\"a: b\"").unwrap(), Value::from("a: b"));
    assert_eq!(decode("[3]: 1,2,3").unwrap(), toon!([1, 2, 3]));
    assert_eq!(decode("[0]:").unwrap(), toon!([]));
}

#[test]
fn empty_object_value_vs_empty_array_value() {
    assert_eq!(decode("a:\nb[0]:").unwrap(), toon!({ "a": {}, "b": [] }));
    // A trailing `key:` with nothing below is an empty object.
    assert_eq!(decode("x: 1\na:").unwrap(), toon!({ "x": 1, "a": {} }));
}

#[test]
fn quoted_keys_and_values() {
    assert_eq!(
        decode("\"two words\": 1\n\"\": \"true\"").unwrap(),
        toon!({ "two words": 1, "": "true" })
    );
    assert_eq!(
        decode("v: \"line1\\nline2\\t\\\"q\\\\\"").unwrap(),
        toon!({ "v": "line1\nline2\t\"q\\" })
    );
}

#[test]
fn strict_count_enforcement() {
    // Inline, one short and one long.
    let err = decode("tags[3]: a,b").unwrap_err();
    assert_eq!(
        err,
        Error::CountMismatch { line: 1, expected: 3, found: 2 }
    );
    let err = decode("tags[1]: a,b").unwrap_err();
    assert_eq!(
        err,
        Error::CountMismatch { line: 1, expected: 1, found: 2 }
    );

    // List bodies report the header's line.
    let err = decode("x: 1\nitems[2]:\n  - a").unwrap_err();
    assert_eq!(
        err,
        Error::CountMismatch { line: 2, expected: 2, found: 1 }
    );

    // Tabular rows, one extra.
    let err = decode("rows[1]{a}:\n  1\n  2").unwrap_err();
    assert_eq!(
        err,
        Error::CountMismatch { line: 1, expected: 1, found: 2 }
    );
}

#[test]
fn lenient_mode_takes_observed_counts() {
    assert_eq!(
        decode_with_options("tags[3]: a,b", &lenient()).unwrap(),
        toon!({ "tags": ["a", "b"] })
    );
    assert_eq!(
        decode_with_options("items[1]:\n  - a\n  - b", &lenient()).unwrap(),
        toon!({ "items": ["a", "b"] })
    );
    assert_eq!(
        decode_with_options("rows[9]{a}:\n  1", &lenient()).unwrap(),
        toon!({ "rows": [{ "a": 1 }] })
    );
}

#[test]
fn rejected_length_marker_forms() {
    for text in ["[#3]: 1,2,3", "x[#3]: 1,2,3", "x[3#]: 1,2,3", "x[#]:"] {
        let err = decode(text).unwrap_err();
        match err {
            Error::Syntax { msg, .. } => {
                assert!(msg.contains('#') || msg.contains("length"), "{msg}")
            }
            other => panic!("expected syntax error for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn misindentation() {
    // Not a multiple of the indent width: strict error, lenient floor.
    let err = decode("a:\n   b: 1").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
    assert_eq!(
        decode_with_options("a:\n   b: 1", &lenient()).unwrap(),
        toon!({ "a": { "b": 1 } })
    );

    // A line deeper than any expected block is always an error.
    let err = decode("a: 1\n    b: 2").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn tabs_never_indent() {
    let err = decode("a:\n\tb: 1").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
    let err = decode_with_options("a:\n\tb: 1", &lenient()).unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn string_escape_errors() {
    assert!(matches!(
        decode("v: \"a\\qb\"").unwrap_err(),
        Error::Syntax { line: 1, .. }
    ));
    assert!(matches!(
        decode("v: \"open").unwrap_err(),
        Error::Syntax { line: 1, .. }
    ));
    assert!(matches!(
        decode("v: \"done\" extra").unwrap_err(),
        Error::Syntax { line: 1, .. }
    ));
}

#[test]
fn delimiter_markers_select_the_splitter() {
    assert_eq!(
        decode("items[2\t]: a,b\tc,d").unwrap(),
        toon!({ "items": ["a,b", "c,d"] })
    );
    assert_eq!(
        decode("items[2|]: a,b|c,d").unwrap(),
        toon!({ "items": ["a,b", "c,d"] })
    );
    // Without a marker the document delimiter (comma) applies.
    assert_eq!(
        decode("items[2]: a,b").unwrap(),
        toon!({ "items": ["a", "b"] })
    );
}

#[test]
fn tabular_delimiter_comes_from_the_header() {
    assert_eq!(
        decode("rows[1]{a|b}:\n  1|2").unwrap(),
        toon!({ "rows": [{ "a": 1, "b": 2 }] })
    );
    assert_eq!(
        decode("rows[1\t]{a\tb}:\n  x,y\tz").unwrap(),
        toon!({ "rows": [{ "a": "x,y", "b": "z" }] })
    );
}

#[test]
fn row_arity_must_match_the_field_count() {
    let err = decode("rows[1]{a,b}:\n  1").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
    let err = decode("rows[1]{a,b}:\n  1,2,3").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn list_elements_recurse() {
    assert_eq!(
        decode("xs[3]:\n  - 1\n  - [2]: a,b\n  -").unwrap(),
        toon!({ "xs": [1, ["a", "b"], {}] })
    );
}

#[test]
fn crlf_and_trailing_newline_are_tolerated() {
    assert_eq!(decode("a: 1\r\nb: 2\r\n").unwrap(), toon!({ "a": 1, "b": 2 }));
    assert_eq!(decode("a: 1\n").unwrap(), toon!({ "a": 1 }));
}

#[test]
fn content_after_root_array_is_an_error() {
    let err = decode("[1]: a\nx: 1").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn zero_indent_documents() {
    let options = ToonOptions::new().with_indent(0);
    assert_eq!(
        decode_with_options("a: 1\ntags[2]: x,y", &options).unwrap(),
        toon!({ "a": 1, "tags": ["x", "y"] })
    );
    let err = decode_with_options("a:\n  b: 1", &options).unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn missing_colon_is_a_syntax_error() {
    let err = decode("a: 1\nnot a key line").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn list_marker_outside_an_array_is_an_error() {
    let err = decode("a:\n  - b").unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 2, .. }));
}

#[test]
fn decoded_maps_preserve_textual_order() {
    let value = decode("b: 1\na: 2\nc: 3").unwrap();
    let keys: Vec<_> = value
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}
