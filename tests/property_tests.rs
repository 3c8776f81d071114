//! Property suites over generated values: round-trip, determinism, shape
//! stability, quoting minimality, and output hygiene.

use proptest::prelude::*;
use toon::{decode, decode_with_options, encode, encode_with_options, Delimiter, ToonMap, ToonOptions, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // `Value::from` normalizes non-finite floats and negative zero, so
        // every generated float is a valid normalized scalar.
        any::<f64>().prop_map(Value::from),
        any::<String>().prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((any::<String>(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn all_options() -> impl Strategy<Value = ToonOptions> {
    (1usize..5, prop_oneof![
        Just(Delimiter::Comma),
        Just(Delimiter::Tab),
        Just(Delimiter::Pipe)
    ])
        .prop_map(|(indent, delimiter)| {
            ToonOptions::new().with_indent(indent).with_delimiter(delimiter)
        })
}

proptest! {
    #[test]
    fn round_trip(value in arb_value(), options in all_options()) {
        let text = encode_with_options(&value, &options).unwrap();
        let decoded = decode_with_options(&text, &options).unwrap();
        prop_assert_eq!(&decoded, &value, "text was {:?}", text);

        // A second encode of the decoded tree is byte-identical.
        let again = encode_with_options(&decoded, &options).unwrap();
        prop_assert_eq!(again, text);
    }

    #[test]
    fn encoding_is_deterministic(value in arb_value(), options in all_options()) {
        let a = encode_with_options(&value, &options).unwrap();
        let b = encode_with_options(&value, &options).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn no_structural_bleed(value in arb_value(), options in all_options()) {
        let text = encode_with_options(&value, &options).unwrap();
        prop_assert!(!text.contains('\r'));
        prop_assert!(!text.ends_with('\n'));
        for line in text.lines() {
            prop_assert_eq!(line, line.trim_end());
            let trimmed = line.trim_start();
            let leading = &line[..line.len() - trimmed.len()];
            prop_assert!(leading.chars().all(|c| c == ' '));
        }
    }

    /// A sequence of uniform scalar-valued objects always emits tabular; a
    /// scalar-only sequence always emits inline; breaking uniformity always
    /// falls back to the list shape.
    #[test]
    fn shape_stability(
        keys in prop::collection::hash_set("[a-z]{1,6}", 1..5),
        row_count in 2usize..5,
        scalars in prop::collection::vec(arb_scalar(), 1..8),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();

        // Uniform rows → tabular.
        let rows: Vec<Value> = (0..row_count)
            .map(|i| {
                let mut map = ToonMap::new();
                for key in &keys {
                    map.insert(key.clone(), Value::from(i as i64));
                }
                Value::Object(map)
            })
            .collect();
        let text = encode(&Value::Array(rows.clone())).unwrap();
        prop_assert!(
            text.starts_with(&format!("[{}]{{", row_count)),
            "expected tabular, got {:?}",
            text
        );

        // One element with an extra key → list.
        let mut broken = rows;
        if let Some(Value::Object(map)) = broken.last_mut() {
            map.insert("zzz_extra".to_string(), Value::Null);
        }
        let text = encode(&Value::Array(broken)).unwrap();
        prop_assert!(
            text.contains("\n") && text.contains("- "),
            "expected list, got {:?}",
            text
        );

        // Scalars only → a single inline line.
        let text = encode(&Value::Array(scalars.clone())).unwrap();
        prop_assert!(!text.contains('\n'), "expected inline, got {:?}", text);
    }

    /// The encoder quotes a string if and only if the safe-unquoted
    /// predicate fails; an unquoted rendering always reads back as the same
    /// string.
    #[test]
    fn quoting_minimality(s in any::<String>()) {
        let text = encode(&Value::String(s.clone())).unwrap();
        if text.starts_with('"') {
            prop_assert!(
                !safe_unquoted_mirror(&s, ','),
                "needlessly quoted {:?} as {:?}",
                s,
                text
            );
        } else {
            prop_assert_eq!(&text, &s);
            prop_assert_eq!(decode(&text).unwrap(), Value::String(s));
        }
    }

    /// Values containing inactive delimiters stay unquoted; the active one
    /// forces quotes.
    #[test]
    fn delimiter_isolation(word in "[a-z]{1,4}") {
        let comma_text = format!("{word},{word}");
        let value = Value::Array(vec![Value::String(comma_text.clone())]);

        let tabbed = encode_with_options(
            &value,
            &ToonOptions::new().with_delimiter(Delimiter::Tab),
        )
        .unwrap();
        prop_assert!(!tabbed.contains('"'), "comma quoted under tab: {:?}", tabbed);

        let commaed = encode(&value).unwrap();
        prop_assert!(commaed.contains('"'), "comma unquoted under comma: {:?}", commaed);
    }
}

/// Test-local mirror of the encoder's safe-unquoted predicate, kept in sync
/// deliberately so regressions in either direction surface here.
fn safe_unquoted_mirror(s: &str, delimiter: char) -> bool {
    if s.is_empty() {
        return false;
    }
    let first = s.chars().next().unwrap();
    let last = s.chars().next_back().unwrap();
    if first.is_whitespace() || last.is_whitespace() {
        return false;
    }
    if s == "-" || s.starts_with("- ") {
        return false;
    }
    if matches!(s, "true" | "false" | "null") {
        return false;
    }
    if is_numeric_mirror(s) {
        return false;
    }
    if let Some(rest) = s.strip_prefix("0x") {
        if !rest.is_empty() && rest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return false;
        }
    }
    if let Some(rest) = s.strip_prefix("0b") {
        if !rest.is_empty() && rest.bytes().all(|b| matches!(b, b'0' | b'1')) {
            return false;
        }
    }
    s.chars().all(|ch| {
        ch != delimiter
            && !matches!(ch, ':' | '[' | ']' | '{' | '}' | '"' | '\\')
            && (ch as u32) >= 0x20
    })
}

fn is_numeric_mirror(s: &str) -> bool {
    let sign = |c: char| c == '+' || c == '-';
    let mut rest = s.strip_prefix(sign).unwrap_or(s);
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }
    rest = &rest[digits..];
    if let Some(frac) = rest.strip_prefix('.') {
        let digits = frac.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return false;
        }
        rest = &frac[digits..];
    }
    if let Some(exp) = rest.strip_prefix(|c| c == 'e' || c == 'E') {
        let exp = exp.strip_prefix(sign).unwrap_or(exp);
        let digits = exp.bytes().take_while(u8::is_ascii_digit).count();
        return digits > 0 && digits == exp.len();
    }
    rest.is_empty()
}
