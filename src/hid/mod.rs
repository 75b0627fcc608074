//! # HID Bridge Protocol Module
//!
//! Wire format for reaching the host as a multi-axis pointing device.
//!
//! This module handles:
//! - The compiled-in HID report descriptor
//! - Translation/rotation reports (3 × signed 16-bit little-endian)
//! - Framing and CRC8-DVB-S2 for the serial link to the USB-HID bridge

pub mod crc;
pub mod descriptor;
pub mod encoder;
pub mod protocol;
