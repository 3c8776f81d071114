//! The `toon!` construction macro.

use toon::{encode, toon, Number, ToonMap, Value};

#[test]
fn primitives() {
    assert_eq!(toon!(null), Value::Null);
    assert_eq!(toon!(true), Value::Bool(true));
    assert_eq!(toon!(false), Value::Bool(false));
    assert_eq!(toon!(42), Value::Number(Number::Integer(42)));
    assert_eq!(toon!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(toon!("hello"), Value::String("hello".to_string()));
}

#[test]
fn expressions_go_through_the_normalizer() {
    let n = 6 * 7;
    assert_eq!(toon!(n), Value::Number(Number::Integer(42)));

    let name = String::from("Ada");
    assert_eq!(toon!(name), Value::String("Ada".to_string()));

    // Normalization applies to macro inputs too.
    assert_eq!(toon!(f64::NAN), Value::Null);
}

#[test]
fn arrays() {
    assert_eq!(toon!([]), Value::Array(vec![]));
    assert_eq!(
        toon!([1, "x", null]),
        Value::Array(vec![Value::from(1), Value::from("x"), Value::Null])
    );
    assert_eq!(
        toon!([[1], [2, 3]]),
        Value::Array(vec![
            Value::Array(vec![Value::from(1)]),
            Value::Array(vec![Value::from(2), Value::from(3)]),
        ])
    );
}

#[test]
fn objects() {
    assert_eq!(toon!({}), Value::Object(ToonMap::new()));

    let value = toon!({
        "name": "Alice",
        "age": 30,
        "pets": ["cat", "dog"],
        "address": { "city": "Basel" }
    });
    assert_eq!(value["name"], Value::from("Alice"));
    assert_eq!(value["age"], Value::from(30));
    assert_eq!(value["pets"][1], Value::from("dog"));
    assert_eq!(value["address"]["city"], Value::from("Basel"));
}

#[test]
fn macro_values_encode_directly() {
    let value = toon!({ "tags": ["a", "b"], "n": 1 });
    assert_eq!(encode(&value).unwrap(), "tags[2]: a,b\nn: 1");
}
