/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Objects become mappings (keys may be string or integer literals), arrays
/// become sequences, `nil`/`true`/`false` map to themselves and anything
/// else goes through `Value::from`.
///
/// ```rust
/// use tabletext::{table, Value};
///
/// let value = table!({
///     "name": "Alice",
///     "tags": ["admin", "ops"],
///     1: nil
/// });
/// assert_eq!(value.get("name"), Some(&Value::from("Alice")));
/// assert_eq!(value.get(1), Some(&Value::Nil));
/// ```
#[macro_export]
macro_rules! table {
    (nil) => {
        $crate::Value::Nil
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::table!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($crate::Key::from($key), $crate::table!($value));
        )*
        $crate::Value::Mapping(table)
    }};

    ($s:expr) => {
        $crate::Value::from($s)
    };
}
