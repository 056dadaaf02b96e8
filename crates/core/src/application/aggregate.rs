// Aggregator - query several daemons and merge their answers

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::StatusLines;
use crate::port::{SourceError, StatusSource};

/// A source that did not answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub label: String,
    pub error: SourceError,
}

/// Merged status plus the sources that failed to contribute
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub lines: StatusLines,
    pub failures: Vec<SourceFailure>,
    pub answered: usize,
}

impl AggregateReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Queries every source concurrently and merges the collections by name.
///
/// Each source is queried through its own client, so the single-connection
/// rule of a client is never broken.
pub struct Aggregator {
    sources: Vec<Box<dyn StatusSource>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with_sources(sources: Vec<Box<dyn StatusSource>>) -> Self {
        Self { sources }
    }

    pub fn add(&mut self, source: Box<dyn StatusSource>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Fetch from all sources; one failing source does not fail the rest.
    pub async fn collect(&mut self) -> AggregateReport {
        let fetches = self.sources.iter_mut().map(|source| async move {
            let label = source.label();
            let result = source.fetch_status().await;
            (label, result)
        });

        let mut report = AggregateReport::default();
        for (label, result) in join_all(fetches).await {
            match result {
                Ok(lines) => {
                    debug!(source = %label, records = lines.len(), "Source answered");
                    report.lines = report.lines.merge(&lines);
                    report.answered += 1;
                }
                Err(error) => {
                    warn!(source = %label, error = %error, "Source failed");
                    report.failures.push(SourceFailure { label, error });
                }
            }
        }
        report
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
