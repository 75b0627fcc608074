//! # Serial Communication Module
//!
//! Serial link to the USB-HID bridge microcontroller.
//!
//! This module handles:
//! - Opening the bridge's serial port (8N1)
//! - Registering the HID report descriptor once at startup
//! - Writing one framed input report per call

pub mod port_trait;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use self::port_trait::{BridgePort, SerialBridgePort};
use crate::error::{Result, SpacestickError};
use crate::hid::encoder::{encode_descriptor_frame, encode_input_report_frame};
use crate::output::Transport;

/// Bridge device paths tried when none is configured (in order of preference)
const DEFAULT_DEVICE_PATHS: &[&str] = &[
    "/dev/ttyACM0", // USB CDC (native USB microcontrollers)
    "/dev/ttyUSB0", // USB-to-serial adapters
];

/// HID bridge serial handler
pub struct BridgeSerial {
    port: Box<dyn BridgePort>,
    device_path: String,
}

impl std::fmt::Debug for BridgeSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl BridgeSerial {
    /// Open the bridge
    ///
    /// Uses `port` when non-empty, otherwise tries the default device paths.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if no bridge device can be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use spacestick::serial::BridgeSerial;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let serial = BridgeSerial::open("", 115200)?;
    ///     println!("Bridge at: {}", serial.device_path());
    ///     Ok(())
    /// }
    /// ```
    pub fn open(port: &str, baud_rate: u32) -> Result<Self> {
        if port.is_empty() {
            Self::open_with_paths(DEFAULT_DEVICE_PATHS, baud_rate)
        } else {
            Self::open_with_paths(&[port], baud_rate)
        }
    }

    /// Open the first device in `paths` that accepts the connection
    pub fn open_with_paths(paths: &[&str], baud_rate: u32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Opened HID bridge at {} ({} baud)", path, baud_rate);
                    return Ok(Self::with_port(Box::new(SerialBridgePort::new(port)), path));
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                }
            }
        }

        Err(SpacestickError::SerialPortNotFound(paths.join(", ")))
    }

    /// Wrap an already opened port
    pub fn with_port(port: Box<dyn BridgePort>, device_path: &str) -> Self {
        Self {
            port,
            device_path: device_path.to_string(),
        }
    }

    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        use tokio_serial::SerialPortBuilderExt;

        tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| SpacestickError::Serial(format!("Failed to open {}: {}", path, e)))
    }

    async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.port
            .write_frame(frame)
            .await
            .map_err(|e| SpacestickError::Serial(format!("Failed to write frame: {}", e)))?;

        self.port
            .drain()
            .await
            .map_err(|e| SpacestickError::Serial(format!("Failed to drain bridge link: {}", e)))?;

        Ok(())
    }

    /// Path of the opened serial device
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl Transport for BridgeSerial {
    async fn register_descriptor(&mut self, descriptor: &[u8]) -> Result<()> {
        let frame = encode_descriptor_frame(descriptor)?;
        self.write_frame(&frame).await?;
        info!("Registered HID descriptor ({} bytes)", descriptor.len());
        Ok(())
    }

    async fn send_report(&mut self, report_id: u8, payload: &[u8]) -> Result<()> {
        let frame = encode_input_report_frame(report_id, payload)?;
        self.write_frame(&frame).await
    }
}

#[cfg(test)]
mod tests {
    use super::port_trait::mocks::MockBridgePort;
    use super::*;
    use crate::hid::crc::crc8;
    use crate::hid::descriptor::REPORT_DESCRIPTOR;
    use crate::hid::protocol::{FRAMETYPE_DESCRIPTOR, FRAMETYPE_INPUT_REPORT, FRAME_SYNC_BYTE};

    #[test]
    fn test_device_path_order() {
        assert_eq!(DEFAULT_DEVICE_PATHS[0], "/dev/ttyACM0");
        assert_eq!(DEFAULT_DEVICE_PATHS[1], "/dev/ttyUSB0");
    }

    #[tokio::test]
    async fn test_open_with_invalid_paths_returns_error() {
        let invalid_paths = &["/dev/nonexistent0", "/dev/nonexistent1"];
        let result = BridgeSerial::open_with_paths(invalid_paths, 115200);

        match result {
            Err(SpacestickError::SerialPortNotFound(msg)) => {
                assert!(msg.contains("/dev/nonexistent0"));
                assert!(msg.contains("/dev/nonexistent1"));
            }
            other => panic!("Expected SerialPortNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_with_empty_paths_returns_error() {
        let result = BridgeSerial::open_with_paths(&[], 115200);
        assert!(matches!(result, Err(SpacestickError::SerialPortNotFound(_))));
    }

    #[tokio::test]
    async fn test_register_descriptor_writes_one_frame() {
        let mock = MockBridgePort::new();
        let mut serial = BridgeSerial::with_port(Box::new(mock.clone()), "mock");

        serial.register_descriptor(&REPORT_DESCRIPTOR).await.unwrap();

        let written = mock.frames();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0][0], FRAME_SYNC_BYTE);
        assert_eq!(written[0][2], FRAMETYPE_DESCRIPTOR);
        assert_eq!(mock.drains(), 1);
    }

    #[tokio::test]
    async fn test_send_report_frames_payload() {
        let mock = MockBridgePort::new();
        let mut serial = BridgeSerial::with_port(Box::new(mock.clone()), "mock");

        serial.send_report(2, &[1, 2, 3, 4, 5, 6]).await.unwrap();

        let written = mock.frames();
        assert_eq!(written.len(), 1);
        let frame = &written[0];
        assert_eq!(frame[2], FRAMETYPE_INPUT_REPORT);
        assert_eq!(&frame[3..10], &[2, 1, 2, 3, 4, 5, 6]);
        assert_eq!(frame[10], crc8(&frame[1..10]));
    }

    #[tokio::test]
    async fn test_each_frame_is_drained_in_order() {
        let mock = MockBridgePort::new();
        let mut serial = BridgeSerial::with_port(Box::new(mock.clone()), "mock");

        serial.send_report(1, &[0; 6]).await.unwrap();
        serial.send_report(2, &[0; 6]).await.unwrap();

        let frames = mock.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][3], 1);
        assert_eq!(frames[1][3], 2);
        assert_eq!(mock.drains(), 2);
    }

    #[tokio::test]
    async fn test_write_error_is_reported() {
        let mock = MockBridgePort::new();
        mock.set_write_error(std::io::ErrorKind::BrokenPipe);
        let mut serial = BridgeSerial::with_port(Box::new(mock.clone()), "mock");

        let result = serial.send_report(1, &[0; 6]).await;
        match result {
            Err(SpacestickError::Serial(msg)) => assert!(msg.contains("Failed to write frame")),
            other => panic!("Expected Serial error, got: {:?}", other),
        }
        assert_eq!(mock.drains(), 0);
    }

    #[test]
    fn test_debug_hides_port() {
        let serial = BridgeSerial::with_port(Box::new(MockBridgePort::new()), "/dev/ttyACM0");
        let text = format!("{:?}", serial);
        assert!(text.contains("/dev/ttyACM0"));
    }

    // Integration test - only runs if the bridge is connected
    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_register_with_real_hardware() {
        match BridgeSerial::open("", 115200) {
            Ok(mut serial) => {
                let result = serial.register_descriptor(&REPORT_DESCRIPTOR).await;
                assert!(result.is_ok(), "Failed to register descriptor: {:?}", result);
            }
            Err(_) => println!("No HID bridge detected (skipping)"),
        }
    }
}
