//! # HID Report Descriptor
//!
//! Multi-axis controller layout matching a commercial 3D mouse, so host
//! drivers pick the device up without extra configuration.
//!
//! | Report | Usages | Layout |
//! |--------|--------|--------|
//! | 1 | X, Y, Z | 3 × i16 |
//! | 2 | RX, RY, RZ | 3 × i16 |
//! | 3 | Buttons 1-32 | 32 bits |
//!
//! Axes declare a logical range of ±500 mapped onto the physical range
//! -32768..32767.

use super::protocol::{REPORT_ID_BUTTONS, REPORT_ID_ROTATION, REPORT_ID_TRANSLATION};

/// Report descriptor registered with the bridge at startup
#[rustfmt::skip]
pub const REPORT_DESCRIPTOR: [u8; 86] = [
    0x05, 0x01,                    // Usage Page (Generic Desktop)
    0x09, 0x08,                    // Usage (Multi-Axis Controller)
    0xA1, 0x01,                    // Collection (Application)

    0xA1, 0x00,                    //   Collection (Physical)
    0x85, REPORT_ID_TRANSLATION,   //     Report ID (1)
    0x16, 0x0C, 0xFE,              //     Logical Minimum (-500)
    0x26, 0xF4, 0x01,              //     Logical Maximum (500)
    0x36, 0x00, 0x80,              //     Physical Minimum (-32768)
    0x46, 0xFF, 0x7F,              //     Physical Maximum (32767)
    0x09, 0x30,                    //     Usage (X)
    0x09, 0x31,                    //     Usage (Y)
    0x09, 0x32,                    //     Usage (Z)
    0x75, 0x10,                    //     Report Size (16)
    0x95, 0x03,                    //     Report Count (3)
    0x81, 0x02,                    //     Input (Data, Variable, Absolute)
    0xC0,                          //   End Collection

    0xA1, 0x00,                    //   Collection (Physical)
    0x85, REPORT_ID_ROTATION,      //     Report ID (2)
    0x16, 0x0C, 0xFE,              //     Logical Minimum (-500)
    0x26, 0xF4, 0x01,              //     Logical Maximum (500)
    0x36, 0x00, 0x80,              //     Physical Minimum (-32768)
    0x46, 0xFF, 0x7F,              //     Physical Maximum (32767)
    0x09, 0x33,                    //     Usage (RX)
    0x09, 0x34,                    //     Usage (RY)
    0x09, 0x35,                    //     Usage (RZ)
    0x75, 0x10,                    //     Report Size (16)
    0x95, 0x03,                    //     Report Count (3)
    0x81, 0x02,                    //     Input (Data, Variable, Absolute)
    0xC0,                          //   End Collection

    0xA1, 0x00,                    //   Collection (Physical)
    0x85, REPORT_ID_BUTTONS,       //     Report ID (3)
    0x15, 0x00,                    //     Logical Minimum (0)
    0x25, 0x01,                    //     Logical Maximum (1)
    0x75, 0x01,                    //     Report Size (1)
    0x95, 0x20,                    //     Report Count (32)
    0x05, 0x09,                    //     Usage Page (Button)
    0x19, 0x01,                    //     Usage Minimum (Button 1)
    0x29, 0x20,                    //     Usage Maximum (Button 32)
    0x81, 0x02,                    //     Input (Data, Variable, Absolute)
    0xC0,                          //   End Collection

    0xC0,                          // End Collection
];
