// Status Source Port (Interface)
// Anything that can answer a status query: a live daemon client, a fixture, a mock

use crate::domain::StatusLines;
use async_trait::async_trait;
use thiserror::Error;

/// Why a source could not produce a status collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Response truncated: {0}")]
    Truncated(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// One daemon's worth of status
#[async_trait]
pub trait StatusSource: Send {
    /// Label used when reporting failures (e.g. `host:port`)
    fn label(&self) -> String;

    /// Fetch the current status collection
    ///
    /// # Errors
    /// - SourceError::Connection if the source cannot be reached
    /// - SourceError::Protocol if the response is malformed
    async fn fetch_status(&mut self) -> Result<StatusLines, SourceError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Mock source that replays a fixed answer
    pub struct MockStatusSource {
        label: String,
        answer: Result<StatusLines, SourceError>,
        call_count: usize,
    }

    impl MockStatusSource {
        pub fn new_ok(label: impl Into<String>, lines: StatusLines) -> Self {
            Self {
                label: label.into(),
                answer: Ok(lines),
                call_count: 0,
            }
        }

        pub fn new_fail(label: impl Into<String>, error: SourceError) -> Self {
            Self {
                label: label.into(),
                answer: Err(error),
                call_count: 0,
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count
        }
    }

    #[async_trait]
    impl StatusSource for MockStatusSource {
        fn label(&self) -> String {
            self.label.clone()
        }

        async fn fetch_status(&mut self) -> Result<StatusLines, SourceError> {
            self.call_count += 1;
            self.answer.clone()
        }
    }
}
