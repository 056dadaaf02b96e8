//! Gearadmin Client - admin protocol client for job-queue daemons
//!
//! Connects to one daemon, sends `status`, and parses the reply into a
//! [`StatusLines`] collection.
//!
//! # Example
//!
//! ```no_run
//! use gearadmin_client::GearadminClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut first = GearadminClient::new("gearman-1", 4730);
//!     let mut second = GearadminClient::new("gearman-2", 4730);
//!
//!     // One client per daemon; combine afterwards
//!     let total = first.status().await?.merge(&second.status().await?);
//!     println!("{} queues", total.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod reader;
mod source;

pub use client::{GearadminClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT};
pub use error::{ClientError, Result};
pub use gearadmin_core::{SortKey, StatusLines, StatusRecord};
pub use source::CheckedSource;
