//! TCP telemetry stream server
//!
//! Fans serialized frames out to any number of TCP subscribers. A dedicated
//! accept task owns the listener; each subscriber gets its own writer task
//! fed from a broadcast channel, so a slow or dead subscriber never blocks
//! the engine tick. Subscribers that fall behind drop frames.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use super::FrameSink;
use crate::error::TelemetryError;
use crate::telemetry::{FrameFormat, VehicleFrame};

/// Stream server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// TCP bind address (e.g. "0.0.0.0:9930")
    pub bind_address: String,
    /// Text layout sent to subscribers
    pub format: FrameFormat,
    /// Frames buffered per subscriber before the oldest are dropped
    pub capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9930".to_string(),
            format: FrameFormat::Full,
            capacity: 256,
        }
    }
}

/// TCP fan-out server for telemetry frames.
///
/// Implements [`FrameSink`], so it can be handed directly to the sampler:
/// `send_frame` serializes the frame once and broadcasts the text without
/// blocking. Having no subscribers is not an error; the frame is simply
/// discarded.
///
/// Dropping the server stops the accept loop and releases the listener;
/// connected subscribers are disconnected once the last sender is gone.
pub struct StreamServer {
    tx: broadcast::Sender<String>,
    local_addr: SocketAddr,
    format: FrameFormat,
    accept_task: tokio::task::JoinHandle<()>,
}

impl StreamServer {
    /// Bind the listener and start accepting subscribers.
    ///
    /// Must be called from within a tokio runtime; the accept loop and the
    /// per-subscriber writer tasks are spawned onto it.
    pub async fn bind(config: StreamConfig) -> Result<Self, TelemetryError> {
        let listener = TcpListener::bind(&config.bind_address).await?;
        let local_addr = listener.local_addr()?;
        let (tx, _) = broadcast::channel(config.capacity.max(1));

        let accept_task = tokio::spawn(accept_loop(listener, tx.clone()));
        tracing::info!(%local_addr, "telemetry stream server listening");

        Ok(Self {
            tx,
            local_addr,
            format: config.format,
            accept_task,
        })
    }

    /// Address the server is listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Drop for StreamServer {
    fn drop(&mut self) {
        // The accept loop holds its own sender clone and would otherwise
        // keep the listener bound, accepting subscribers that can never
        // receive a frame.
        self.accept_task.abort();
    }
}

impl FrameSink for StreamServer {
    fn send_frame(&mut self, frame: &VehicleFrame) {
        // Err here means no subscribers are connected, which is fine.
        let _ = self.tx.send(frame.serialize_text(self.format));
    }
}

async fn accept_loop(listener: TcpListener, tx: broadcast::Sender<String>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::info!(%peer, "telemetry subscriber connected");
                tokio::spawn(serve_subscriber(stream, tx.subscribe(), peer));
            }
            Err(e) => {
                tracing::warn!("telemetry accept failed: {e}");
            }
        }
    }
}

async fn serve_subscriber(
    mut stream: TcpStream,
    mut rx: broadcast::Receiver<String>,
    peer: SocketAddr,
) {
    loop {
        match rx.recv().await {
            Ok(text) => {
                if stream.write_all(text.as_bytes()).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(dropped)) => {
                tracing::debug!(%peer, dropped, "telemetry subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::info!(%peer, "telemetry subscriber disconnected");
}
