//! Response Reader
//!
//! The admin protocol has no length prefix: a reply is every line up to a
//! line holding a single `.`. A background task reads lines off the stream
//! and hands them over a capacity-1 channel, so at most one line is in
//! flight. The task closes the channel when it sees the terminator, the end
//! of the stream, or a read error. All three look the same to the consumer;
//! [`ResponseEnd`] tells them apart once the task is joined.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Line that ends a multi-line reply
pub const TERMINATOR: &str = ".";

/// How the producer stopped
#[derive(Debug)]
pub enum ResponseEnd {
    /// The terminator line was read
    Terminator,
    /// The peer closed the stream (a trailing partial line is dropped)
    Eof,
    /// A read failed
    Failed(io::Error),
    /// The consumer stopped listening before the reply ended
    Abandoned,
}

impl ResponseEnd {
    /// True only when the terminator was seen
    pub fn is_complete(&self) -> bool {
        matches!(self, ResponseEnd::Terminator)
    }

    /// True when the stream can no longer be trusted for another request
    pub fn is_broken(&self) -> bool {
        !self.is_complete()
    }
}

/// Lines of one reply, produced by a background task
pub struct ResponseLines<R> {
    rx: mpsc::Receiver<String>,
    handle: JoinHandle<(R, ResponseEnd)>,
}

impl<R> ResponseLines<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    /// Start reading a reply from `reader`
    pub fn spawn(reader: R) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(produce_lines(reader, tx));
        Self { rx, handle }
    }

    /// Next line with its line ending removed; `None` once the channel closes
    pub async fn next_line(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Stop listening and get the stream back along with how the reply ended.
    ///
    /// Lines not yet received are abandoned.
    pub async fn finish(self) -> Result<(R, ResponseEnd), tokio::task::JoinError> {
        drop(self.rx);
        self.handle.await
    }
}

async fn produce_lines<R>(mut reader: R, tx: mpsc::Sender<String>) -> (R, ResponseEnd)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => return (reader, ResponseEnd::Eof),
            Ok(_) => {}
            Err(e) => return (reader, ResponseEnd::Failed(e)),
        }
        let Some(raw) = strip_line_ending(&buf) else {
            // Stream ended mid-line
            return (reader, ResponseEnd::Eof);
        };
        // Names are opaque bytes; undecodable ones are replaced, not fatal
        let line = String::from_utf8_lossy(raw);
        if line == TERMINATOR {
            return (reader, ResponseEnd::Terminator);
        }
        trace!(line = %line, "Response line");
        if tx.send(line.into_owned()).await.is_err() {
            return (reader, ResponseEnd::Abandoned);
        }
    }
}

/// Strip `\n` (and a preceding `\r`); `None` if the line is unterminated
fn strip_line_ending(raw: &[u8]) -> Option<&[u8]> {
    let line = raw.strip_suffix(b"\n")?;
    Some(line.strip_suffix(b"\r").unwrap_or(line))
}
