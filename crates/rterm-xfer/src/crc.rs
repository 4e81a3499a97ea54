//! CRC-16 and byte-sum checksum primitives over a block's data region.

use crc::{Crc, CRC_16_XMODEM};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// CRC-16/XMODEM: polynomial 0x1021, initial value 0, MSB-first, no final
/// XOR, computed over `data` only (the caller slices out the payload
/// region of a block before calling this).
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    CRC16.checksum(data)
}

/// 8-bit sum of `data`, modulo 256, used by the plain-checksum flavors.
#[must_use]
pub fn checksum8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc16_of_zeroed_128_bytes_is_zero() {
        assert_eq!(crc16(&[0u8; 128]), 0x0000);
    }

    #[test]
    fn crc16_of_check_string_is_0x31c3() {
        assert_eq!(crc16(b"123456789"), 0x31C3);
    }

    #[test]
    fn checksum8_wraps() {
        assert_eq!(checksum8(&[0xFF, 0x02]), 0x01);
        assert_eq!(checksum8(&[0u8; 128]), 0);
    }
}
