//! Status source adapters for multi-daemon aggregation

use async_trait::async_trait;
use gearadmin_core::domain::filter::accept_all;
use gearadmin_core::port::{SourceError, StatusSource};
use gearadmin_core::StatusLines;

use crate::client::GearadminClient;
use crate::error::ClientError;

impl From<ClientError> for SourceError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Connection { .. } | ClientError::ConnectTimeout { .. } => {
                SourceError::Connection(e.to_string())
            }
            ClientError::Io(_) => SourceError::Connection(e.to_string()),
            ClientError::Parse(_) => SourceError::Protocol(e.to_string()),
            ClientError::TruncatedResponse { .. } => SourceError::Truncated(e.to_string()),
            ClientError::ReaderTask(_) => SourceError::Internal(e.to_string()),
        }
    }
}

#[async_trait]
impl StatusSource for GearadminClient {
    fn label(&self) -> String {
        self.addr().to_string()
    }

    async fn fetch_status(&mut self) -> Result<StatusLines, SourceError> {
        Ok(self.status().await?)
    }
}

/// Client wrapper whose status fails when a reply is truncated
pub struct CheckedSource(pub GearadminClient);

#[async_trait]
impl StatusSource for CheckedSource {
    fn label(&self) -> String {
        self.0.addr().to_string()
    }

    async fn fetch_status(&mut self) -> Result<StatusLines, SourceError> {
        Ok(self.0.status_checked(accept_all).await?)
    }
}
