// Application Layer - Use cases over one or more status sources

pub mod aggregate;

// Re-exports
pub use aggregate::{AggregateReport, Aggregator, SourceFailure};
