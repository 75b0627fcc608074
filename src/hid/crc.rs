//! # CRC-8/DVB-S2
//!
//! Checksum protecting every frame on the serial link to the HID bridge.
//!
//! **Polynomial**: 0xD5 (x^8 + x^7 + x^6 + x^4 + x^2 + 1)
//! **Initial Value**: 0x00

/// CRC-8/DVB-S2 polynomial
const CRC8_POLY: u8 = 0xD5;

/// Lookup table, built at compile time
const CRC8_TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;

        while bit < 8 {
            crc = if crc & 0x80 != 0 { (crc << 1) ^ CRC8_POLY } else { crc << 1 };
            bit += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Checksum over `data` (length + type + payload of a frame)
///
/// # Examples
///
/// ```
/// use spacestick::hid::crc::crc8;
///
/// assert_eq!(crc8(b"123456789"), 0xBC);
/// ```
#[must_use]
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |crc, &byte| CRC8_TABLE[(crc ^ byte) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bitwise reference, used to check the table
    fn crc8_bitwise(data: &[u8]) -> u8 {
        let mut crc: u8 = 0;
        for &byte in data {
            crc ^= byte;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 { (crc << 1) ^ CRC8_POLY } else { crc << 1 };
            }
        }
        crc
    }

    #[test]
    fn test_crc8_empty() {
        assert_eq!(crc8(&[]), 0x00);
    }

    #[test]
    fn test_crc8_check_value() {
        assert_eq!(crc8(b"123456789"), 0xBC);
    }

    #[test]
    fn test_table_matches_bitwise() {
        let samples: [&[u8]; 5] = [
            &[0x01, 0x02, 0x03],
            &[0xFF, 0xFE, 0xFD],
            &[0x09, 0x02, 0x01, 0xF4, 0x01, 0x0C, 0xFE, 0x00, 0x00],
            &[0x00; 24],
            &[0xFF; 10],
        ];

        for data in samples {
            assert_eq!(crc8(data), crc8_bitwise(data), "CRC mismatch for {:?}", data);
        }
    }

    #[test]
    fn test_crc8_changes_with_data() {
        assert_ne!(crc8(&[0x09, 0x02, 0x01, 0x04]), crc8(&[0x09, 0x02, 0x01, 0x05]));
    }
}
