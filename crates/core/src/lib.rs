// Gearadmin Core - Status Model & Ports
// NO networking dependencies: the protocol client lives in gearadmin-client

pub mod application;
pub mod domain;
pub mod port;

pub use domain::{ParseError, SortKey, StatusLines, StatusRecord, UnknownSortKey};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
