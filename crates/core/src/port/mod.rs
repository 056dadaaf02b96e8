// Port Layer - Interfaces to whatever produces status collections

pub mod status_source;

// Re-exports
pub use status_source::{SourceError, StatusSource};
