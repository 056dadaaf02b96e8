//! Gearadmin Client Implementation

use std::future::Future;
use std::io;
use std::time::Duration;

use gearadmin_core::domain::filter::accept_all;
use gearadmin_core::{StatusLines, StatusRecord};
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::reader::{ResponseEnd, ResponseLines};

/// Dial timeout used when none is given
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Port job-queue daemons listen on unless told otherwise
pub const DEFAULT_PORT: u16 = 4730;

const STATUS_COMMAND: &str = "status";

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

/// Admin protocol client for a single daemon
///
/// Holds at most one connection. Methods take `&mut self`, so one client
/// cannot serve two queries at once; use one client per daemon and merge
/// the results.
///
/// # Example
///
/// ```no_run
/// use gearadmin_client::GearadminClient;
/// use gearadmin_core::SortKey;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = GearadminClient::new("127.0.0.1", 4730);
/// let mut status = client.status().await?;
/// status.sort(SortKey::Queued, false);
/// for record in status.iter() {
///     println!("{}", record);
/// }
/// # Ok(())
/// # }
/// ```
pub struct GearadminClient {
    host: String,
    port: u16,
    addr: String,
    dial_timeout: Duration,
    conn: Option<Connection>,
}

impl GearadminClient {
    /// Create a client for `host:port`. Does not connect.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let addr = format!("{}:{}", host, port);
        Self {
            host,
            port,
            addr,
            dial_timeout: DEFAULT_CONNECT_TIMEOUT,
            conn: None,
        }
    }

    /// Timeout for connections opened implicitly by status calls
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.dial_timeout = timeout;
        self
    }

    /// Connection string, `host:port`
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Connect with the configured timeout ([`DEFAULT_CONNECT_TIMEOUT`] unless changed)
    pub async fn connect(&mut self) -> Result<()> {
        self.connect_timeout(self.dial_timeout).await
    }

    /// Connect unless already connected
    ///
    /// # Errors
    /// - ClientError::ConnectTimeout if the dial does not finish in `timeout`
    /// - ClientError::Connection if the dial is refused or fails
    pub async fn connect_timeout(&mut self, timeout: Duration) -> Result<()> {
        if self.conn.is_none() {
            self.conn = Some(self.dial(timeout).await?);
        }
        Ok(())
    }

    /// Drop the connection, if any. A later call connects again.
    pub fn close(&mut self) {
        if self.conn.take().is_some() {
            debug!(addr = %self.addr, "Connection closed");
        }
    }

    /// Every queue the daemon reports, in response order
    pub async fn status(&mut self) -> Result<StatusLines> {
        self.status_filtered(accept_all).await
    }

    /// Queues accepted by `predicate`, in response order.
    ///
    /// A reply cut short by a closed or failed stream is returned as-is; use
    /// [`GearadminClient::status_checked`] to have that reported.
    ///
    /// # Errors
    /// - ClientError::Connection / ConnectTimeout if connecting fails
    /// - ClientError::Io if the command cannot be written
    /// - ClientError::Parse on the first line that is not four fields;
    ///   nothing parsed from that reply is returned
    pub async fn status_filtered<P>(&mut self, predicate: P) -> Result<StatusLines>
    where
        P: FnMut(&StatusRecord) -> bool,
    {
        let (status, _) = self.query_status(predicate).await?;
        Ok(status)
    }

    /// Like [`GearadminClient::status_filtered`], but a reply that ends
    /// without the terminator line is an error.
    ///
    /// # Errors
    /// - ClientError::TruncatedResponse if the stream closed or failed first
    pub async fn status_checked<P>(&mut self, predicate: P) -> Result<StatusLines>
    where
        P: FnMut(&StatusRecord) -> bool,
    {
        let (status, received) = self.query_status(predicate).await?;
        match received {
            Received::Complete => Ok(status),
            Received::Truncated(received) => Err(ClientError::TruncatedResponse { received }),
        }
    }

    async fn query_status<P>(&mut self, mut predicate: P) -> Result<(StatusLines, Received)>
    where
        P: FnMut(&StatusRecord) -> bool,
    {
        // Held outside `self` for the call; put back only if the stream is still sound
        let mut conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.dial(self.dial_timeout).await?,
        };

        send_command(&mut conn.writer, STATUS_COMMAND).await?;
        debug!(addr = %self.addr, command = STATUS_COMMAND, "Command sent");

        let mut lines = ResponseLines::spawn(conn.reader);
        let mut status = StatusLines::new();
        let mut received = 0usize;
        let mut parse_error = None;

        // Keep draining after a bad line so the stream stays aligned
        while let Some(line) = lines.next_line().await {
            received += 1;
            if parse_error.is_some() {
                continue;
            }
            match StatusRecord::parse(&line) {
                Ok(record) if predicate(&record) => status.push(record),
                Ok(_) => {}
                Err(e) => parse_error = Some(e),
            }
        }

        let (reader, end) = lines.finish().await?;
        debug!(addr = %self.addr, received, end = ?end, "Response read");

        let outcome = if end.is_complete() {
            self.conn = Some(Connection {
                reader,
                writer: conn.writer,
            });
            Received::Complete
        } else {
            if let ResponseEnd::Failed(e) = &end {
                debug!(addr = %self.addr, error = %e, "Response read failed, dropping connection");
            }
            Received::Truncated(received)
        };

        match parse_error {
            Some(e) => Err(e.into()),
            None => Ok((status, outcome)),
        }
    }

    async fn dial(&self, timeout: Duration) -> Result<Connection> {
        debug!(addr = %self.addr, ?timeout, "Connecting");
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let stream = connect_within(&self.addr, timeout, connect).await?;

        let (read_half, write_half) = stream.into_split();
        Ok(Connection {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }
}

/// Bound a dial by `timeout`, mapping both failure modes to connection errors
async fn connect_within<F, T>(addr: &str, timeout: Duration, connect: F) -> Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match tokio::time::timeout(timeout, connect).await {
        Ok(Ok(stream)) => Ok(stream),
        Ok(Err(source)) => Err(ClientError::Connection {
            addr: addr.to_string(),
            source,
        }),
        Err(_) => Err(ClientError::ConnectTimeout {
            addr: addr.to_string(),
            timeout,
        }),
    }
}

enum Received {
    Complete,
    Truncated(usize),
}

/// Write one command line and flush it
async fn send_command(writer: &mut BufWriter<OwnedWriteHalf>, command: &str) -> Result<()> {
    writer.write_all(command.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
