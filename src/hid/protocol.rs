//! # HID Bridge Protocol Constants and Types
//!
//! Framing used on the serial link to the USB-HID bridge microcontroller.
//!
//! ```text
//! [sync 0x5A][len][type][payload ...][crc8]
//! ```
//!
//! `len` counts type + payload + crc. The CRC covers len + type + payload.

use crate::error::{Result, SpacestickError};

/// Frame sync byte
pub const FRAME_SYNC_BYTE: u8 = 0x5A;

/// Registers the HID report descriptor (sent once at startup)
pub const FRAMETYPE_DESCRIPTOR: u8 = 0x01;

/// Carries one input report: report id followed by report bytes
pub const FRAMETYPE_INPUT_REPORT: u8 = 0x02;

/// Maximum frame payload size
pub const MAX_PAYLOAD_SIZE: usize = 128;

/// Translation triplet report (X, Y, Z)
pub const REPORT_ID_TRANSLATION: u8 = 1;

/// Rotation triplet report (RX, RY, RZ)
pub const REPORT_ID_ROTATION: u8 = 2;

/// Button bitfield report (declared in the descriptor, never sent)
pub const REPORT_ID_BUTTONS: u8 = 3;

/// Axis report size: 3 × signed 16-bit little-endian
pub const AXIS_REPORT_SIZE: usize = 6;

/// Input report frame size: sync + len + type + id + report + crc
pub const INPUT_REPORT_FRAME_SIZE: usize = 1 + 1 + 1 + 1 + AXIS_REPORT_SIZE + 1;

/// One frame on the bridge link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeFrame {
    /// Frame type
    pub frame_type: u8,

    /// Payload data
    pub payload: Vec<u8>,
}

impl BridgeFrame {
    /// Create a new frame
    ///
    /// # Errors
    ///
    /// Returns `Frame` error if the payload exceeds [`MAX_PAYLOAD_SIZE`]
    pub fn new(frame_type: u8, payload: Vec<u8>) -> Result<Self> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(SpacestickError::Frame(format!(
                "Payload size {} exceeds maximum {}",
                payload.len(),
                MAX_PAYLOAD_SIZE
            )));
        }

        Ok(Self { frame_type, payload })
    }

    /// Frame length byte (type + payload + crc)
    ///
    /// Cannot overflow: the payload is at most 128 bytes.
    pub fn length(&self) -> u8 {
        (1 + self.payload.len() + 1) as u8
    }
}
