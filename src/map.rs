//! The mapping type and its helpers.
//!
//! [`Table`] wraps an [`IndexMap`] keyed by [`Key`]. Entries iterate in
//! insertion order in memory; serialization sorts them (see
//! [`Table::sorted_keys`]), so the order entries were inserted in never
//! changes the output. Equality ignores order.
//!
//! The free functions [`is_empty_mapping`], [`has_key`] and [`rename_key`]
//! are thin wrappers over the corresponding methods.
//!
//! ## Examples
//!
//! ```rust
//! use tabletext::{Table, Value};
//!
//! let mut map = Table::new();
//! map.insert("name", Value::from("Alice"));
//! map.insert(1, Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert!(map.contains_key(1));
//! ```

use crate::{Error, Key, Result, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A mapping of unique [`Key`]s to [`Value`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Table(IndexMap<Key, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Builds a table keyed `1..=n` from a list of values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::{Table, Value};
    ///
    /// let table = Table::from_sequence(vec![Value::from("a"), Value::from("b")]);
    /// assert_eq!(table.get(2), Some(&Value::from("b")));
    /// ```
    #[must_use]
    pub fn from_sequence(items: Vec<Value>) -> Self {
        items
            .into_iter()
            .enumerate()
            .map(|(idx, value)| (Key::Integer(idx as i64 + 1), value))
            .collect()
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table already contained this key, the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::{Table, Value};
    ///
    /// let mut map = Table::new();
    /// assert!(map.insert("key", Value::from(42)).is_none());
    /// assert!(map.insert("key", Value::from(43)).is_some());
    /// ```
    pub fn insert<K: Into<Key>>(&mut self, key: K, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get<K: Into<Key>>(&self, key: K) -> Option<&Value> {
        self.0.get(&key.into())
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<K: Into<Key>>(&mut self, key: K) -> Option<&mut Value> {
        self.0.get_mut(&key.into())
    }

    /// Removes a key, returning its value. Remaining entries keep their order.
    pub fn remove<K: Into<Key>>(&mut self, key: K) -> Option<Value> {
        self.0.shift_remove(&key.into())
    }

    /// Returns `true` if the table holds `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::{Table, Value};
    ///
    /// let mut map = Table::new();
    /// map.insert("a", Value::from(1));
    /// assert!(map.contains_key("a"));
    /// assert!(!map.contains_key(1));
    /// ```
    #[must_use]
    pub fn contains_key<K: Into<Key>>(&self, key: K) -> bool {
        self.0.contains_key(&key.into())
    }

    /// Moves the value stored under `old` to `new` and deletes `old`.
    ///
    /// An existing entry under `new` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `old` is absent; the table is left
    /// untouched in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::{Error, Table, Value};
    ///
    /// let mut map = Table::new();
    /// map.insert("a", Value::from(1));
    ///
    /// map.rename_key("a", "b").unwrap();
    /// assert_eq!(map.get("b"), Some(&Value::from(1)));
    /// assert!(!map.contains_key("a"));
    ///
    /// assert!(matches!(map.rename_key("z", "y"), Err(Error::NotFound(_))));
    /// ```
    pub fn rename_key<K1: Into<Key>, K2: Into<Key>>(&mut self, old: K1, new: K2) -> Result<()> {
        let old = old.into();
        let new = new.into();
        let value = self
            .0
            .shift_remove(&old)
            .ok_or_else(|| Error::not_found(&format!("rename_key: no key '{}'", old)))?;
        self.0.insert(new, value);
        Ok(())
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys in their canonical output order: integers first,
    /// then strings.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&Key> {
        let mut keys: Vec<&Key> = self.0.keys().collect();
        keys.sort();
        keys
    }

    /// If the keys are exactly `1..=len`, returns the values in key order.
    ///
    /// Loading a sequence that was written in the table layout produces an
    /// integer-keyed table; this turns it back into a list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::{Table, Value};
    ///
    /// let mut map = Table::new();
    /// map.insert(2, Value::from("b"));
    /// map.insert(1, Value::from("a"));
    /// assert_eq!(map.to_sequence(), Some(vec![Value::from("a"), Value::from("b")]));
    ///
    /// map.insert("x", Value::Nil);
    /// assert_eq!(map.to_sequence(), None);
    /// ```
    #[must_use]
    pub fn to_sequence(&self) -> Option<Vec<Value>> {
        (1..=self.len() as i64)
            .map(|idx| self.0.get(&Key::Integer(idx)).cloned())
            .collect()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.0.iter()
    }
}

/// Returns `true` if `table` has no entries.
#[must_use]
pub fn is_empty_mapping(table: &Table) -> bool {
    table.is_empty()
}

/// Returns `true` if `table` holds `key`.
#[must_use]
pub fn has_key<K: Into<Key>>(table: &Table, key: K) -> bool {
    table.contains_key(key)
}

/// Moves the value under `old` to `new`. See [`Table::rename_key`].
///
/// # Errors
///
/// Returns [`Error::NotFound`] when `old` is absent.
pub fn rename_key<K1: Into<Key>, K2: Into<Key>>(table: &mut Table, old: K1, new: K2) -> Result<()> {
    table.rename_key(old, new)
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let entries: Vec<(&Key, &Value)> = self
            .sorted_keys()
            .into_iter()
            .filter_map(|k| self.0.get(k).map(|v| (k, v)))
            .filter(|(_, v)| !v.is_unsupported())
            .collect();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (k, v) in entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl From<HashMap<String, Value>> for Table {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().map(|(k, v)| (Key::String(k), v)).collect()
    }
}

impl IntoIterator for Table {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut left = Table::new();
        left.insert("a", Value::from(1));
        left.insert("b", Value::from(2));

        let mut right = Table::new();
        right.insert("b", Value::from(2));
        right.insert("a", Value::from(1));

        assert_eq!(left, right);
    }

    #[test]
    fn test_sorted_keys_mixed() {
        let mut table = Table::new();
        table.insert("name", Value::Nil);
        table.insert(3, Value::Nil);
        table.insert("age", Value::Nil);
        table.insert(1, Value::Nil);

        let keys: Vec<String> = table.sorted_keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["1", "3", "age", "name"]);
    }

    #[test]
    fn test_rename_key_overwrites_target() {
        let mut table = Table::new();
        table.insert("a", Value::from(1));
        table.insert("b", Value::from(2));

        rename_key(&mut table, "a", "b").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("b"), Some(&Value::from(1)));
    }

    #[test]
    fn test_rename_missing_key_leaves_table_untouched() {
        let mut table = Table::new();
        table.insert("a", Value::from(1));

        let err = table.rename_key("z", "b").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(table.get("a"), Some(&Value::from(1)));
        assert!(!table.contains_key("b"));
    }

    #[test]
    fn test_free_helpers() {
        let mut table = Table::new();
        assert!(is_empty_mapping(&table));
        table.insert(1, Value::from(true));
        assert!(!is_empty_mapping(&table));
        assert!(has_key(&table, 1));
        assert!(!has_key(&table, "1"));
    }

    #[test]
    fn test_to_sequence_rejects_gaps() {
        let mut table = Table::new();
        table.insert(1, Value::from("a"));
        table.insert(3, Value::from("c"));
        assert_eq!(table.to_sequence(), None);
        assert_eq!(Table::new().to_sequence(), Some(vec![]));
    }
}
