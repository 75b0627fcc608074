//! # HID Bridge Encoder
//!
//! Encodes axis reports and wraps them into bridge frames.

use bytes::{BufMut, Bytes, BytesMut};

use super::crc::crc8;
use super::protocol::*;
use crate::error::Result;
use crate::motion::Axis3;

/// Encode three axis values as a 6-byte report
///
/// Each component is written as a signed 16-bit little-endian value,
/// saturated to the `i16` range.
///
/// # Examples
///
/// ```
/// use spacestick::hid::encoder::encode_axis_report;
/// use spacestick::motion::Axis3;
///
/// let report = encode_axis_report(Axis3::new(-100, 0, 500));
/// assert_eq!(report, [0x9C, 0xFF, 0x00, 0x00, 0xF4, 0x01]);
/// ```
#[must_use]
pub fn encode_axis_report(axes: Axis3) -> [u8; AXIS_REPORT_SIZE] {
    let mut report = [0u8; AXIS_REPORT_SIZE];
    let mut buf = &mut report[..];

    for value in axes.to_array() {
        buf.put_i16_le(saturate_i16(value));
    }

    report
}

fn saturate_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Encode a frame: sync + length + type + payload + crc
///
/// # Examples
///
/// ```
/// use spacestick::hid::encoder::encode_frame;
/// use spacestick::hid::protocol::{BridgeFrame, FRAMETYPE_INPUT_REPORT, FRAME_SYNC_BYTE};
///
/// let frame = BridgeFrame::new(FRAMETYPE_INPUT_REPORT, vec![1, 0, 0, 0, 0, 0, 0])?;
/// let bytes = encode_frame(&frame);
/// assert_eq!(bytes[0], FRAME_SYNC_BYTE);
/// assert_eq!(bytes.len(), 11);
/// # Ok::<(), spacestick::error::SpacestickError>(())
/// ```
#[must_use]
pub fn encode_frame(frame: &BridgeFrame) -> Bytes {
    let mut out = BytesMut::with_capacity(frame.payload.len() + 4);
    out.put_u8(FRAME_SYNC_BYTE);
    out.put_u8(frame.length());
    out.put_u8(frame.frame_type);
    out.put_slice(&frame.payload);

    // CRC over length + type + payload
    let crc = crc8(&out[1..]);
    out.put_u8(crc);

    out.freeze()
}

/// Encode the descriptor registration frame
///
/// # Errors
///
/// Returns `Frame` error if the descriptor does not fit in one frame
pub fn encode_descriptor_frame(descriptor: &[u8]) -> Result<Bytes> {
    let frame = BridgeFrame::new(FRAMETYPE_DESCRIPTOR, descriptor.to_vec())?;
    Ok(encode_frame(&frame))
}

/// Encode an input report frame: report id followed by the report bytes
///
/// # Errors
///
/// Returns `Frame` error if the report does not fit in one frame
pub fn encode_input_report_frame(report_id: u8, report: &[u8]) -> Result<Bytes> {
    let mut payload = Vec::with_capacity(1 + report.len());
    payload.push(report_id);
    payload.extend_from_slice(report);

    let frame = BridgeFrame::new(FRAMETYPE_INPUT_REPORT, payload)?;
    Ok(encode_frame(&frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpacestickError;
    use crate::hid::descriptor::REPORT_DESCRIPTOR;

    #[test]
    fn test_axis_report_little_endian() {
        let report = encode_axis_report(Axis3::new(1, -1, 0x1234));
        assert_eq!(report, [0x01, 0x00, 0xFF, 0xFF, 0x34, 0x12]);
    }

    #[test]
    fn test_axis_report_limits() {
        let report = encode_axis_report(Axis3::new(500, -500, 0));
        assert_eq!(i16::from_le_bytes([report[0], report[1]]), 500);
        assert_eq!(i16::from_le_bytes([report[2], report[3]]), -500);
        assert_eq!(i16::from_le_bytes([report[4], report[5]]), 0);
    }

    #[test]
    fn test_axis_report_saturates_to_i16() {
        let report = encode_axis_report(Axis3::new(100_000, -100_000, 0));
        assert_eq!(i16::from_le_bytes([report[0], report[1]]), i16::MAX);
        assert_eq!(i16::from_le_bytes([report[2], report[3]]), i16::MIN);
    }

    #[test]
    fn test_input_report_frame_structure() {
        let report = encode_axis_report(Axis3::new(-100, 0, 100));
        let frame = encode_input_report_frame(REPORT_ID_TRANSLATION, &report).unwrap();

        assert_eq!(frame.len(), INPUT_REPORT_FRAME_SIZE);
        assert_eq!(frame[0], FRAME_SYNC_BYTE);
        assert_eq!(frame[1], 9); // type + id + 6 + crc
        assert_eq!(frame[2], FRAMETYPE_INPUT_REPORT);
        assert_eq!(frame[3], REPORT_ID_TRANSLATION);
        assert_eq!(&frame[4..10], &report);
        assert_eq!(frame[10], crc8(&frame[1..10]));
    }

    #[test]
    fn test_descriptor_frame_structure() {
        let frame = encode_descriptor_frame(&REPORT_DESCRIPTOR).unwrap();

        assert_eq!(frame.len(), REPORT_DESCRIPTOR.len() + 4);
        assert_eq!(frame[0], FRAME_SYNC_BYTE);
        assert_eq!(frame[1] as usize, REPORT_DESCRIPTOR.len() + 2);
        assert_eq!(frame[2], FRAMETYPE_DESCRIPTOR);
        assert_eq!(&frame[3..frame.len() - 1], &REPORT_DESCRIPTOR[..]);
    }

    #[test]
    fn test_descriptor_frame_too_large() {
        let result = encode_descriptor_frame(&[0u8; MAX_PAYLOAD_SIZE + 1]);
        assert!(matches!(result, Err(SpacestickError::Frame(_))));
    }

    #[test]
    fn test_different_reports_different_crc() {
        let a = encode_input_report_frame(REPORT_ID_ROTATION, &encode_axis_report(Axis3::new(1, 2, 3))).unwrap();
        let b = encode_input_report_frame(REPORT_ID_ROTATION, &encode_axis_report(Axis3::new(1, 2, 4))).unwrap();
        assert_ne!(a[10], b[10]);
    }
}
