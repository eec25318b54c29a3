//! Configuration options for table serialization.
//!
//! - [`Options`]: main configuration struct (indent width, layout, table name)
//! - [`Layout`]: which of the two document forms to write
//!
//! ## Examples
//!
//! ```rust
//! use tabletext::{Layout, Options};
//!
//! let options = Options::new().with_name("settings").with_indent(2);
//! assert_eq!(options.layout, Layout::Table);
//!
//! let options = Options::array();
//! assert_eq!(options.layout, Layout::Array);
//! ```

/// The two document forms.
///
/// - **Table**: a named mapping written one entry per line,
///   `name = { [ "key" ] = value, ... }` followed by `return name`
/// - **Array**: a bare list written as `return { ... }`, mapping elements
///   inline and scalar elements as quoted strings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Table,
    Array,
}

/// Configuration options for serialization and [`persist`](crate::fs::persist).
///
/// # Examples
///
/// ```rust
/// use tabletext::{Layout, Options};
///
/// let options = Options::new()
///     .with_layout(Layout::Table)
///     .with_name("profile")
///     .with_indent(4);
/// assert_eq!(options.name, "profile");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Spaces per nesting level.
    pub indent: usize,
    pub layout: Layout,
    /// Variable name of the table layout. Must be an identifier.
    pub name: String,
}

pub const DEFAULT_TABLE_NAME: &str = "data";

impl Default for Options {
    fn default() -> Self {
        Options {
            indent: 4,
            layout: Layout::default(),
            name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

impl Options {
    /// Creates default options (table layout, 4-space indent, name `data`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::Options;
    ///
    /// let options = Options::new();
    /// assert_eq!(options.indent, 4);
    /// assert_eq!(options.name, "data");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for the array layout.
    #[must_use]
    pub fn array() -> Self {
        Options {
            layout: Layout::Array,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per nesting level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the variable name used by the table layout.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
