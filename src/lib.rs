//! # Spacestick Library
//!
//! Turn an array of analog joystick potentiometers into a 6-DOF pointing
//! device.
//!
//! Each tick, raw channel readings are smoothed, centered on their startup
//! baseline, mapped into a translation/rotation motion vector by one of two
//! rig topologies, gated and clamped, then sent to the host as two HID
//! reports through a USB-HID bridge.

pub mod config;
pub mod error;
pub mod hid;
pub mod input;
pub mod motion;
pub mod output;
pub mod pipeline;
pub mod serial;
