//! Client Error Types

use std::io;
use std::time::Duration;

use gearadmin_core::ParseError;
use thiserror::Error;

/// Client Result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client Error
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Connection error: {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Connection error: {addr}: timed out after {timeout:?}")]
    ConnectTimeout { addr: String, timeout: Duration },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Protocol parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Truncated response: stream ended after {received} lines without terminator")]
    TruncatedResponse { received: usize },

    #[error("Reader task failed: {0}")]
    ReaderTask(String),
}

impl ClientError {
    /// Dial refused, unreachable, or timed out
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            ClientError::Connection { .. } | ClientError::ConnectTimeout { .. }
        )
    }
}

impl From<tokio::task::JoinError> for ClientError {
    fn from(e: tokio::task::JoinError) -> Self {
        ClientError::ReaderTask(e.to_string())
    }
}
