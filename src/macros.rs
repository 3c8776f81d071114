//! The [`toon!`] macro for building [`Value`](crate::Value) trees inline.

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// ```rust
/// use toon::toon;
///
/// let value = toon!({
///     "name": "Alice",
///     "age": 30,
///     "tags": ["rust", "serde"]
/// });
/// assert_eq!(value["age"].as_i64(), Some(30));
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($element:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($element)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ToonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ToonMap::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression goes through the normalizer.
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
