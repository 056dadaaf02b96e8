// Domain Error Types

use thiserror::Error;

/// Number of whitespace-separated fields in a status line
pub const STATUS_FIELD_COUNT: usize = 4;

/// A status line could not be turned into a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Wrong number of fields: expected {}, found {found} in {line:?}", STATUS_FIELD_COUNT)]
    FieldCount { found: usize, line: String },
}

/// Sort key name that is not one of name, queued, running, workers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort key: {0} (expected name, queued, running or workers)")]
pub struct UnknownSortKey(pub String);

pub type Result<T> = std::result::Result<T, ParseError>;
