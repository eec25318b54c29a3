//! Table-literal serialization.
//!
//! The [`Serializer`] writes a [`Value`] tree in one of two forms:
//!
//! - **Table layout** ([`Serializer::write_table`]): a named assignment, one
//!   entry per line, every key bracketed (`[ "key" ]` or `[ 1 ]`), keys
//!   sorted integers-first, nested mappings indented one level deeper and
//!   followed by a comma.
//! - **Array layout** ([`Serializer::write_array`]): `return { ... }` with
//!   one element per line. Mapping elements are written inline with their
//!   keys sorted by their string form; scalar elements become quoted strings.
//!
//! The two forms order and format keys differently on purpose. Both load back
//! through [`crate::de::Parser`].
//!
//! ## Usage
//!
//! ```rust
//! use tabletext::{table, Options, Serializer};
//!
//! let settings = table!({ "volume": 3, "name": "main" });
//! let mut serializer = Serializer::new(Options::new());
//! serializer
//!     .write_table("settings", settings.as_mapping().unwrap())
//!     .unwrap();
//!
//! assert_eq!(
//!     serializer.into_inner(),
//!     "settings = {\n    [ \"name\" ] = \"main\",\n    [ \"volume\" ] = 3,\n}\n"
//! );
//! ```

use crate::de::MAX_DEPTH;
use crate::{Error, Key, Layout, Options, Result, Table, Value};
use std::borrow::Cow;

const RESERVED_WORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Returns `true` if `s` can be written as a bare name (`key = value`,
/// `name = { ... }`).
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !RESERVED_WORDS.contains(&s)
}

/// The table-literal serializer.
///
/// Output accumulates in an in-memory buffer; nothing is written anywhere
/// until the caller takes it with [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: Options,
}

impl Serializer {
    pub fn new(options: Options) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes a complete loadable document for `value`, in the layout
    /// selected by the options.
    ///
    /// The table layout accepts a mapping or a sequence (written keyed
    /// `1..n`) and appends the `return name` trailer. The array layout
    /// accepts a sequence.
    ///
    /// # Errors
    ///
    /// [`Error::Type`] when `value` does not fit the layout,
    /// [`Error::InvalidArgument`] for a bad table name or a non-finite float.
    pub fn write_document(&mut self, value: &Value) -> Result<()> {
        match (self.options.layout, value) {
            (Layout::Table, Value::Mapping(_) | Value::Sequence(_)) => {
                let name = self.options.name.clone();
                self.write_assignment(&name, sorted_entries(value))?;
                self.output.push_str("return ");
                self.output.push_str(&name);
                self.output.push('\n');
                Ok(())
            }
            (Layout::Array, Value::Sequence(items)) => self.write_array(items),
            (Layout::Table, other) => Err(Error::type_error(&format!(
                "table layout expects a mapping or sequence, found {}",
                other.type_name()
            ))),
            (Layout::Array, other) => Err(Error::type_error(&format!(
                "array layout expects a sequence, found {}",
                other.type_name()
            ))),
        }
    }

    /// Writes `name = { ... }` for `table`, ending with the closing brace of
    /// the outer mapping.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `name` is not an identifier or a float
    /// in the tree is infinite or NaN.
    pub fn write_table(&mut self, name: &str, table: &Table) -> Result<()> {
        self.write_assignment(name, table_entries(table))
    }

    fn write_assignment(&mut self, name: &str, entries: Vec<Entry<'_>>) -> Result<()> {
        if !is_identifier(name) {
            return Err(Error::invalid_argument(&format!(
                "table name '{}' is not an identifier",
                name
            )));
        }
        self.output.push_str(name);
        self.output.push_str(" = {\n");
        self.write_block_entries(entries, 0)?;
        self.output.push_str("}\n");
        Ok(())
    }

    fn write_block_entries(&mut self, entries: Vec<Entry<'_>>, depth: usize) -> Result<()> {
        for (key, item) in entries {
            match item {
                Value::Unsupported(_) => continue,
                Value::Mapping(_) | Value::Sequence(_) => {
                    // The enclosing braces sit at level depth + 1.
                    check_depth(depth + 2)?;
                    self.write_indent(depth + 1);
                    self.write_bracketed_key(&key);
                    self.output.push_str(" = {\n");
                    self.write_block_entries(sorted_entries(item), depth + 1)?;
                    self.write_indent(depth + 1);
                    self.output.push_str("},\n");
                }
                scalar => {
                    self.write_indent(depth + 1);
                    self.write_bracketed_key(&key);
                    self.output.push_str(" = ");
                    self.write_scalar(scalar)?;
                    self.output.push_str(",\n");
                }
            }
        }
        Ok(())
    }

    /// Writes `return { ... }` for a list of items.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when a float nested inside a mapping element
    /// is infinite or NaN.
    pub fn write_array(&mut self, items: &[Value]) -> Result<()> {
        self.output.push_str("return {\n");
        for item in items {
            match item {
                Value::Unsupported(_) => continue,
                Value::Mapping(_) | Value::Sequence(_) => {
                    self.write_indent(1);
                    self.write_inline(item, 2)?;
                }
                scalar => {
                    self.write_indent(1);
                    write_quoted(&mut self.output, &scalar.to_string());
                }
            }
            self.output.push_str(",\n");
        }
        self.output.push_str("}\n");
        Ok(())
    }

    /// `level` counts the braces this element opens, `return {` being 1.
    fn write_inline(&mut self, value: &Value, level: usize) -> Result<()> {
        check_depth(level)?;
        let mut entries = sorted_entries(value);
        entries.retain(|(_, v)| !v.is_unsupported());
        // Array layout orders by the key's string form: "10" before "2".
        entries.sort_by_cached_key(|(key, _)| key.to_string());

        if entries.is_empty() {
            self.output.push_str("{}");
            return Ok(());
        }

        self.output.push_str("{ ");
        for (idx, (key, item)) in entries.iter().enumerate() {
            if idx > 0 {
                self.output.push_str(", ");
            }
            match &**key {
                Key::Integer(_) => {}
                Key::String(s) if is_identifier(s) => {
                    self.output.push_str(s);
                    self.output.push_str(" = ");
                }
                other => {
                    self.write_bracketed_key(other);
                    self.output.push_str(" = ");
                }
            }
            match item {
                Value::Mapping(_) | Value::Sequence(_) => self.write_inline(item, level + 1)?,
                scalar => self.write_scalar(scalar)?,
            }
        }
        self.output.push_str(" }");
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) {
        for _ in 0..depth * self.options.indent {
            self.output.push(' ');
        }
    }

    fn write_bracketed_key(&mut self, key: &Key) {
        self.output.push_str("[ ");
        match key {
            Key::Integer(i) => self.output.push_str(&i.to_string()),
            Key::String(s) => write_quoted(&mut self.output, s),
        }
        self.output.push_str(" ]");
    }

    fn write_scalar(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Nil => self.output.push_str("nil"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => {
                if !n.is_finite() {
                    return Err(Error::invalid_argument(&format!(
                        "cannot represent non-finite number {}",
                        n.as_f64()
                    )));
                }
                self.output.push_str(&n.to_string());
            }
            Value::String(s) => write_quoted(&mut self.output, s),
            other => {
                return Err(Error::type_error(&format!(
                    "expected a scalar, found {}",
                    other.type_name()
                )))
            }
        }
        Ok(())
    }
}

fn check_depth(level: usize) -> Result<()> {
    if level > MAX_DEPTH {
        return Err(Error::invalid_argument(&format!(
            "tables nested deeper than {} levels cannot be loaded back",
            MAX_DEPTH
        )));
    }
    Ok(())
}

type Entry<'a> = (Cow<'a, Key>, &'a Value);

fn table_entries(table: &Table) -> Vec<Entry<'_>> {
    table
        .sorted_keys()
        .into_iter()
        .filter_map(|key| table.get(key).map(|item| (Cow::Borrowed(key), item)))
        .collect()
}

/// Entries of a mapping (or a sequence keyed `1..n`) in canonical key order.
/// Scalars have no entries.
fn sorted_entries(value: &Value) -> Vec<Entry<'_>> {
    match value {
        Value::Mapping(table) => table_entries(table),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| (Cow::Owned(Key::Integer(idx as i64 + 1)), item))
            .collect(),
        _ => Vec::new(),
    }
}

/// Writes `s` as a double-quoted literal that loads back as the same string.
#[inline]
fn write_quoted(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            // Three digits so a following digit is not read as part of the escape.
            c if c.is_ascii_control() => output.push_str(&format!("\\{:03}", c as u32)),
            _ => output.push(ch),
        }
    }
    output.push('"');
}
