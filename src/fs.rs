//! File helpers: persisting and loading table documents, plus small
//! existence/creation/truncation/append utilities.
//!
//! Every operation opens at most one file handle and drops it before
//! returning, on success and on error alike. Nothing guards against
//! concurrent writers to the same path; the last writer wins.
//!
//! ## Examples
//!
//! ```rust
//! use tabletext::fs::{load, persist};
//! use tabletext::{table, Options};
//!
//! let dir = std::env::temp_dir().join(format!("tabletext-doc-{}", std::process::id()));
//! std::fs::create_dir_all(&dir).unwrap();
//! let path = dir.join("settings.lua");
//!
//! let settings = table!({ "volume": 7, "muted": false });
//! persist(&settings, &path, &Options::new().with_name("settings")).unwrap();
//! assert_eq!(load(&path).unwrap(), settings);
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```

use crate::{Error, Options, Result, Value};
use chrono::{Local, NaiveDateTime};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

fn io_failure(op: &str, path: &Path, source: &io::Error) -> Error {
    warn!("cannot {} '{}': {}", op, path.display(), source);
    Error::io(op, path, source)
}

/// Serializes `value` in the layout selected by `options` and writes it to
/// `path`, replacing any previous content.
///
/// The whole document is rendered in memory before the file is opened, so a
/// serialization error leaves an existing file untouched. A failure while
/// writing can still leave a truncated file behind.
///
/// # Errors
///
/// Serialization errors from [`crate::to_string_with_options`], or
/// [`Error::Io`] when the file cannot be opened or written.
pub fn persist<P: AsRef<Path>>(value: &Value, path: P, options: &Options) -> Result<()> {
    let path = path.as_ref();
    let text = crate::to_string_with_options(value, options.clone())?;

    let mut file = File::create(path).map_err(|e| io_failure("open", path, &e))?;
    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| io_failure("write", path, &e))?;

    debug!("persisted {} bytes to '{}'", text.len(), path.display());
    Ok(())
}

/// Reads and evaluates a table document.
///
/// # Errors
///
/// [`Error::Io`] when the file cannot be read, [`Error::Parse`] when the
/// content is malformed or does not evaluate to a table.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_failure("read", path, &e))?;
    let value = crate::from_str_value(&text)?;
    debug!("loaded {} bytes from '{}'", text.len(), path.display());
    Ok(value)
}

/// Loads a table document and deserializes it into `T`.
///
/// # Errors
///
/// Everything [`load`] reports, plus [`Error::Custom`] when the table does
/// not match the shape of `T`.
pub fn load_as<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    crate::from_value(load(path)?)
}

/// Returns `true` if `path` names an existing regular file.
#[must_use]
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Creates an empty file at `path`.
///
/// # Errors
///
/// [`Error::AlreadyExists`] when something already exists at `path`,
/// [`Error::Io`] for any other failure.
pub fn create_file_if_absent<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            debug!("created '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(Error::already_exists(
            &format!("create_file_if_absent: '{}'", path.display()),
        )),
        Err(e) => Err(io_failure("create", path, &e)),
    }
}

/// Empties an existing file.
///
/// # Errors
///
/// [`Error::NotFound`] when the file does not exist, [`Error::Io`] for any
/// other failure.
pub fn truncate_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    match OpenOptions::new().write(true).truncate(true).open(path) {
        Ok(_) => {
            debug!("truncated '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::not_found(&format!(
            "truncate_file: '{}'",
            path.display()
        ))),
        Err(e) => Err(io_failure("truncate", path, &e)),
    }
}

/// Which timestamp, if any, [`append_line`] puts in front of the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimestampMode {
    #[default]
    None,
    /// `[HH:MM:SS] `
    Time,
    /// `[YYYY-MM-DD] `
    Date,
    /// `[YYYY-MM-DD HH:MM:SS] `
    Both,
}

impl TimestampMode {
    /// The line prefix for a given moment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use tabletext::fs::TimestampMode;
    ///
    /// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
    ///     .unwrap()
    ///     .and_hms_opt(7, 5, 0)
    ///     .unwrap();
    /// assert_eq!(TimestampMode::Time.prefix(&at), "[07:05:00] ");
    /// assert_eq!(TimestampMode::Both.prefix(&at), "[2024-03-09 07:05:00] ");
    /// assert_eq!(TimestampMode::None.prefix(&at), "");
    /// ```
    #[must_use]
    pub fn prefix(&self, at: &NaiveDateTime) -> String {
        match self {
            TimestampMode::None => String::new(),
            TimestampMode::Time => at.format("[%H:%M:%S] ").to_string(),
            TimestampMode::Date => at.format("[%Y-%m-%d] ").to_string(),
            TimestampMode::Both => at.format("[%Y-%m-%d %H:%M:%S] ").to_string(),
        }
    }
}

impl FromStr for TimestampMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "none" => Ok(TimestampMode::None),
            "time" => Ok(TimestampMode::Time),
            "date" => Ok(TimestampMode::Date),
            "both" => Ok(TimestampMode::Both),
            other => Err(Error::invalid_argument(&format!(
                "unknown timestamp mode '{}' (expected none, time, date or both)",
                other
            ))),
        }
    }
}

impl fmt::Display for TimestampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimestampMode::None => "none",
            TimestampMode::Time => "time",
            TimestampMode::Date => "date",
            TimestampMode::Both => "both",
        })
    }
}

/// Appends `text` as one line to `path`, creating the file if needed, with
/// a local-time prefix chosen by `mode`.
///
/// # Errors
///
/// [`Error::Io`] when the file cannot be opened or written.
pub fn append_line<P: AsRef<Path>>(text: &str, path: P, mode: TimestampMode) -> Result<()> {
    let path = path.as_ref();
    let line = format!("{}{}\n", mode.prefix(&Local::now().naive_local()), text);

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| io_failure("open", path, &e))?;
    file.write_all(line.as_bytes())
        .map_err(|e| io_failure("append to", path, &e))?;

    debug!("appended {} bytes to '{}'", line.len(), path.display());
    Ok(())
}
