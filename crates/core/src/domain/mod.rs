// Domain Layer - Status records and the operations over them

pub mod error;
pub mod filter;
pub mod numeric;
pub mod record;
pub mod sort;
pub mod status_lines;

// Re-exports
pub use error::{ParseError, UnknownSortKey};
pub use record::StatusRecord;
pub use sort::SortKey;
pub use status_lines::StatusLines;
