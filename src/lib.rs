//! # tabletext
//!
//! Serialize nested tables to re-loadable, Lua-style table literals, and load
//! them back. Alongside the codec sit a few small stateless helpers: file
//! existence/creation/truncation/timestamped append, byte-size and duration
//! formatting, whitespace trimming and random passwords.
//!
//! ## Two Layouts
//!
//! The **table layout** writes a named mapping, one entry per line, keys
//! sorted (integers first) and always bracketed:
//!
//! ```text
//! settings = {
//!     [ 1 ] = "first",
//!     [ "audio" ] = {
//!         [ "volume" ] = 0.75,
//!     },
//!     [ "name" ] = "main",
//! }
//! return settings
//! ```
//!
//! The **array layout** writes a bare list. Mapping elements go on one line
//! with keys sorted by their string form; scalar elements become quoted
//! strings:
//!
//! ```text
//! return {
//!     { id = 1, name = "Ada" },
//!     "42",
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tabletext::{from_str_value, table, to_string_table};
//!
//! let settings = table!({
//!     "name": "main",
//!     "audio": { "volume": 0.75, "muted": false }
//! });
//!
//! let text = to_string_table("settings", settings.as_mapping().unwrap()).unwrap();
//! assert!(text.ends_with("return settings\n"));
//!
//! let loaded = from_str_value(&text).unwrap();
//! assert_eq!(loaded, settings);
//! ```
//!
//! ### Typed Loading
//!
//! ```rust
//! use serde::Deserialize;
//! use tabletext::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Audio { volume: f64, muted: bool }
//!
//! let audio: Audio = from_str("return { volume = 0.5, muted = true }").unwrap();
//! assert_eq!(audio, Audio { volume: 0.5, muted: true });
//! ```
//!
//! ## Safety
//!
//! Loading never executes code. The loader understands assignments, table
//! constructors, literals and `return`, and rejects everything else with a
//! [`Error::Parse`] that carries the line and column.

pub mod de;
pub mod error;
pub mod format;
pub mod fs;
pub mod macros;
pub mod map;
pub mod options;
pub mod password;
pub mod ser;
pub mod value;

pub use de::Parser;
pub use error::{Error, Result};
pub use map::Table;
pub use options::{Layout, Options};
pub use ser::Serializer;
pub use value::{Key, Number, Value};

use serde::de::DeserializeOwned;

/// Serializes `table` as the loadable document `name = { ... }` followed by
/// `return name`.
///
/// # Examples
///
/// ```rust
/// use tabletext::{to_string_table, Table, Value};
///
/// let mut table = Table::new();
/// table.insert("x", Value::from(1));
/// assert_eq!(
///     to_string_table("point", &table).unwrap(),
///     "point = {\n    [ \"x\" ] = 1,\n}\nreturn point\n"
/// );
/// ```
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `name` is not an identifier or a float in
/// the tree is infinite or NaN.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_table(name: &str, table: &Table) -> Result<String> {
    let mut serializer = Serializer::new(Options::new());
    serializer.write_table(name, table)?;
    let mut output = serializer.into_inner();
    output.push_str("return ");
    output.push_str(name);
    output.push('\n');
    Ok(output)
}

/// Serializes `items` in the array layout, `return { ... }`.
///
/// # Examples
///
/// ```rust
/// use tabletext::{table, to_string_array, Value};
///
/// let text = to_string_array(&[table!({ "id": 1 }), Value::from(2)]).unwrap();
/// assert_eq!(text, "return {\n    { id = 1 },\n    \"2\",\n}\n");
/// ```
///
/// # Errors
///
/// [`Error::InvalidArgument`] when a float inside a mapping element is
/// infinite or NaN.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_array(items: &[Value]) -> Result<String> {
    let mut serializer = Serializer::new(Options::array());
    serializer.write_array(items)?;
    Ok(serializer.into_inner())
}

/// Serializes `value` with the default options (table layout named `data`).
///
/// # Errors
///
/// See [`to_string_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, Options::default())
}

/// Serializes `value` as a complete document in the layout chosen by
/// `options`.
///
/// # Examples
///
/// ```rust
/// use tabletext::{table, to_string_with_options, Options};
///
/// let list = table!(["a", "b"]);
/// let text = to_string_with_options(&list, Options::array()).unwrap();
/// assert_eq!(text, "return {\n    \"a\",\n    \"b\",\n}\n");
/// ```
///
/// # Errors
///
/// [`Error::Type`] when `value` does not fit the layout (the table layout
/// needs a mapping or sequence, the array layout a sequence), and
/// [`Error::InvalidArgument`] for a bad table name or a non-finite float.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(value: &Value, options: Options) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.write_document(value)?;
    Ok(serializer.into_inner())
}

/// Evaluates table-literal text into a [`Value`].
///
/// # Errors
///
/// [`Error::Parse`] when the text is malformed or does not evaluate to a
/// mapping or sequence.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_value(s: &str) -> Result<Value> {
    match Parser::new(s).parse()? {
        value @ (Value::Mapping(_) | Value::Sequence(_)) => Ok(value),
        other => Err(Error::parse(
            1,
            1,
            &format!("document evaluates to {}, expected a table", other.type_name()),
        )),
    }
}

/// Evaluates table-literal text and deserializes the result into `T`.
///
/// # Errors
///
/// Everything [`from_str_value`] reports, plus [`Error::Custom`] when the
/// table does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
    from_value(from_str_value(s)?)
}

/// Deserializes a [`Value`] into `T`.
///
/// Integer-keyed mappings with keys `1..n` deserialize as sequences, so
/// lists survive a trip through the table layout.
///
/// # Examples
///
/// ```rust
/// use tabletext::{from_value, table};
///
/// let tags: Vec<String> = from_value(table!(["a", "b"])).unwrap();
/// assert_eq!(tags, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// [`Error::Custom`] when the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(de::ValueDeserializer::new(value))
}
