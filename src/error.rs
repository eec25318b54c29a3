//! Error types for table serialization, loading and the file helpers.
//!
//! Every fallible operation in the crate returns [`Result`], so failures stay
//! local to the call and the caller decides whether to retry.
//!
//! ## Error Categories
//!
//! - **Type**: a value of the wrong kind was handed to an operation
//! - **Invalid Argument**: the value has the right kind but is out of domain
//! - **I/O**: opening, reading or writing a file failed
//! - **Parse**: persisted text is malformed, with line/column information
//! - **Not Found / Already Exists**: existence preconditions on keys or files
//!
//! ## Examples
//!
//! ```rust
//! use tabletext::{from_str_value, Error};
//!
//! let result = from_str_value("return { [ \"a\" ] = }");
//! assert!(matches!(result, Err(Error::Parse { .. })));
//! ```

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Wrong argument type
    #[error("Type error: {0}")]
    Type(String),

    /// Argument outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error during opening, reading or writing
    #[error("IO error: cannot {op} '{path}': {reason}")]
    Io {
        op: String,
        path: String,
        reason: String,
    },

    /// Malformed persisted content
    #[error("Parse error at line {line}, column {col}: {msg}")]
    Parse { line: usize, col: usize, msg: String },

    /// Missing key or file where existence is required
    #[error("Not found: {0}")]
    NotFound(String),

    /// File-creation collision
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Custom error raised through serde
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::Error;
    ///
    /// let err = Error::type_error("expected a mapping, found string");
    /// assert!(err.to_string().contains("expected a mapping"));
    /// ```
    pub fn type_error(msg: &str) -> Self {
        Error::Type(msg.to_string())
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(msg: &str) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates an I/O error for operation `op` on `path`, wrapping the system reason.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::Error;
    ///
    /// let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    /// let err = Error::io("open", "/etc/shadow", &source);
    /// assert!(err.to_string().contains("cannot open '/etc/shadow': denied"));
    /// ```
    pub fn io<P: AsRef<Path> + ?Sized>(op: &str, path: &P, source: &std::io::Error) -> Self {
        Error::Io {
            op: op.to_string(),
            path: path.as_ref().display().to_string(),
            reason: source.to_string(),
        }
    }

    /// Creates a parse error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabletext::Error;
    ///
    /// let err = Error::parse(3, 7, "expected '='");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn parse(line: usize, col: usize, msg: &str) -> Self {
        Error::Parse {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(msg: &str) -> Self {
        Error::NotFound(msg.to_string())
    }

    /// Creates an already-exists error.
    pub fn already_exists(msg: &str) -> Self {
        Error::AlreadyExists(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_reason() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::io("read", "missing.lua", &source);
        match &err {
            Error::Io { op, path, reason } => {
                assert_eq!(op, "read");
                assert_eq!(path, "missing.lua");
                assert_eq!(reason, "no such file");
            }
            other => panic!("Expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::not_found("key 'a'").to_string(),
            "Not found: key 'a'"
        );
        assert_eq!(
            Error::already_exists("out.txt").to_string(),
            "Already exists: out.txt"
        );
        assert_eq!(
            Error::parse(1, 2, "unexpected '}'").to_string(),
            "Parse error at line 1, column 2: unexpected '}'"
        );
    }
}
