//! Mock job-queue daemon speaking the line-oriented admin protocol

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

/// Fixture served for `status`
pub const STATUS_FIXTURE: &str = include_str!("../../testdata/status.txt");

/// How the mock answers a `status` command
#[derive(Debug, Clone)]
pub enum Reply {
    /// Write this text verbatim and keep the connection open
    Text(String),
    /// Write these raw bytes and keep the connection open
    Bytes(Vec<u8>),
    /// Write the first `lines` lines of this text, then close the connection
    CloseAfter { text: String, lines: usize },
}

impl Reply {
    pub fn fixture() -> Self {
        Reply::Text(STATUS_FIXTURE.to_string())
    }
}

pub struct MockDaemon {
    pub addr: SocketAddr,
    connections: Arc<AtomicUsize>,
}

impl MockDaemon {
    /// Bind to an ephemeral port and serve `reply` to every `status` request
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&connections);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let reply = reply.clone();
                tokio::spawn(async move {
                    let (read_half, mut write_half) = stream.into_split();
                    let mut commands = BufReader::new(read_half).lines();
                    while let Ok(Some(command)) = commands.next_line().await {
                        if command != "status" {
                            let _ = write_half.write_all(b"ERR UNKNOWN_COMMAND\n").await;
                            continue;
                        }
                        match &reply {
                            Reply::Text(text) => {
                                if write_half.write_all(text.as_bytes()).await.is_err() {
                                    return;
                                }
                            }
                            Reply::Bytes(bytes) => {
                                if write_half.write_all(bytes).await.is_err() {
                                    return;
                                }
                            }
                            Reply::CloseAfter { text, lines } => {
                                for line in text.lines().take(*lines) {
                                    let _ = write_half.write_all(line.as_bytes()).await;
                                    let _ = write_half.write_all(b"\n").await;
                                }
                                let _ = write_half.shutdown().await;
                                return;
                            }
                        }
                    }
                });
            }
        });

        Self { addr, connections }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Number of TCP connections accepted so far
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

/// A port nothing is listening on
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
