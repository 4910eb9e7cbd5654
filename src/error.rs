use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::Field;

/// Everything that can stop a run; all of them are fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: expected 5 comma separated values, found {found}", path.display())]
    FieldCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    #[error("{}:{line}: invalid {field} value {value:?}: {source}", path.display())]
    ParseInt {
        path: PathBuf,
        line: usize,
        field: Field,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(
        "inconsistent trial comparison: {field} is {found} in trial {trial} of '{label}', expected {expected}"
    )]
    Inconsistent {
        field: Field,
        expected: i64,
        found: i64,
        label: String,
        trial: usize,
    },

    #[error("series '{label}' has no trials")]
    NoTrials { label: String },

    #[error("unknown field '{0}', expected one of threads, key_max, iters, time, time_serial")]
    InvalidField(String),

    #[error("plotting failed: {0}")]
    Plot(String),
}

/// Why a single data line could not become a `Trial`.
#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    #[error("expected 5 comma separated values, found {0}")]
    FieldCount(usize),

    #[error("invalid {field} value {value:?}: {source}")]
    ParseInt {
        field: Field,
        value: String,
        source: ParseIntError,
    },
}

impl LineError {
    pub(crate) fn at(self, path: &Path, line: usize) -> Error {
        let path = path.to_path_buf();
        match self {
            LineError::FieldCount(found) => Error::FieldCount { path, line, found },
            LineError::ParseInt {
                field,
                value,
                source,
            } => Error::ParseInt {
                path,
                line,
                field,
                value,
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
