//! Byte-level link to the HID bridge.
//!
//! [`BridgePort`] is the only thing [`BridgeSerial`](super::BridgeSerial)
//! needs from the port: push one complete frame, then drain it so the
//! bridge sees each report within the tick it was produced in. Tests swap
//! the tokio serial stream for an in-memory recorder.

use async_trait::async_trait;
use std::io;
use tokio::io::AsyncWriteExt;

/// Write side of the bridge link
#[async_trait]
pub trait BridgePort: Send {
    /// Write a whole encoded frame
    async fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;

    /// Block until queued frames have left the host
    async fn drain(&mut self) -> io::Result<()>;
}

/// Bridge link over a tokio serial stream (8N1, no flow control)
pub struct SerialBridgePort {
    stream: tokio_serial::SerialStream,
}

impl SerialBridgePort {
    pub fn new(stream: tokio_serial::SerialStream) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl BridgePort for SerialBridgePort {
    async fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.stream.write_all(frame).await
    }

    async fn drain(&mut self) -> io::Result<()> {
        self.stream.flush().await
    }
}
