//! Crate error type
//!
//! Everything that can go wrong happens at startup: reading settings,
//! loading assets, or taking over the terminal.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// An `io::Error` occurred (terminal or file access).
    Io(std::io::Error),
    /// The settings file is not valid JSON for [`crate::Settings`].
    Json(serde_json::Error),
    /// A required asset file or directory is missing or unreadable.
    Asset {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The controls help text could not be parsed.
    ControlsText(Cow<'static, str>),
    /// Settings parsed, but hold values the game can't use.
    Settings(Cow<'static, str>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::Json(e) => write!(f, "malformed settings: {}", e),
            Error::Asset { path, source } => {
                write!(f, "missing asset {}: {}", path.display(), source)
            }
            Error::ControlsText(msg) => write!(f, "malformed controls text: {}", msg),
            Error::Settings(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Asset { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub type Result<T> = core::result::Result<T, Error>;
