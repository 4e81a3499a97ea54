//! Block construction and verification (§4.2).

use crate::crc::{checksum8, crc16};
use crate::flavor::{BlockSize, Flavor, Framing};
use crate::wire::{BLOCK_HEADER_128, BLOCK_HEADER_1024, SOH, STX};

/// Reasons [`verify_block`] can reject a buffer, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    #[error("block has wrong total length for this flavor")]
    WrongLength,
    #[error("unrecognized block header byte")]
    BadHeader,
    #[error("block sequence number mismatch")]
    BadSequence,
    #[error("block complement byte does not match sequence")]
    BadComplement,
    #[error("checksum does not match payload")]
    ChecksumMismatch,
    #[error("CRC-16 does not match payload")]
    CrcMismatch,
    /// Not a framing error: the block matches the most recently accepted
    /// sequence and must be ACKed again but not re-written to disk.
    #[error("duplicate of the previously accepted block")]
    Duplicate,
}

/// A verified block's sequence number and payload, borrowed from the
/// input buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct VerifiedBlock<'a> {
    pub sequence: u8,
    pub payload: &'a [u8],
}

/// The payload length a 1K-capable flavor uses for a given input chunk:
/// short reads (at or under 128 bytes of real data) get the small 128-byte
/// framing to save bandwidth instead of padding all the way to 1024.
fn payload_len_for_chunk(flavor: Flavor, chunk_len: usize) -> usize {
    match flavor.block_size() {
        BlockSize::Fixed128 => 128,
        BlockSize::Variable1024 => {
            if chunk_len <= 128 {
                128
            } else {
                1024
            }
        }
    }
}

/// Frames `chunk` (a run of file data no longer than the flavor's maximum
/// block size) as a single block into `out`, padding a short chunk with
/// `pad_byte`. Returns the number of bytes written.
///
/// `out` must have room for the worst case: header + sequence + complement
/// + 1024-byte payload + 2-byte CRC, i.e. [`rterm_core::OUTPUT_BYTE_BUDGET`].
pub fn construct_block(out: &mut [u8], flavor: Flavor, sequence: u8, chunk: &[u8], pad_byte: u8) -> usize {
    let payload_len = payload_len_for_chunk(flavor, chunk.len());
    debug_assert!(chunk.len() <= payload_len);

    out[0] = if payload_len == 1024 { BLOCK_HEADER_1024 } else { BLOCK_HEADER_128 };
    out[1] = sequence;
    out[2] = 0xFFu8.wrapping_sub(sequence);

    let payload = &mut out[3..3 + payload_len];
    payload[..chunk.len()].copy_from_slice(chunk);
    payload[chunk.len()..].fill(pad_byte);

    match flavor.framing() {
        Framing::Checksum => {
            let sum = checksum8(&out[3..3 + payload_len]);
            out[3 + payload_len] = sum;
            3 + payload_len + 1
        }
        Framing::Crc16 => {
            let crc = crc16(&out[3..3 + payload_len]);
            out[3 + payload_len] = (crc >> 8) as u8;
            out[3 + payload_len + 1] = (crc & 0xFF) as u8;
            3 + payload_len + 2
        }
    }
}

/// Verifies a full block read from the wire, in the rejection order the
/// base specification lists: length, header byte, sequence, complement,
/// checksum/CRC, then duplicate-of-last-good.
pub fn verify_block(
    buf: &[u8],
    flavor: Flavor,
    expected_sequence: u8,
    last_good_sequence: Option<u8>,
) -> Result<VerifiedBlock<'_>, BlockError> {
    let header = *buf.first().ok_or(BlockError::WrongLength)?;
    let payload_len = match header {
        SOH => 128,
        STX => 1024,
        _ => return Err(BlockError::BadHeader),
    };
    let overhead = match flavor.framing() {
        Framing::Checksum => 1,
        Framing::Crc16 => 2,
    };
    if buf.len() != 3 + payload_len + overhead {
        return Err(BlockError::WrongLength);
    }

    let sequence = buf[1];
    let complement = buf[2];
    // A resent block keeps the last-accepted sequence number rather than
    // the one we're now expecting; that's the duplicate case, not a bad
    // sequence, so it's checked here alongside the expected value.
    let is_duplicate = Some(sequence) == last_good_sequence;
    if sequence != expected_sequence && !is_duplicate {
        return Err(BlockError::BadSequence);
    }
    if complement != 0xFFu8.wrapping_sub(sequence) {
        return Err(BlockError::BadComplement);
    }

    let payload = &buf[3..3 + payload_len];
    match flavor.framing() {
        Framing::Checksum => {
            let want = buf[3 + payload_len];
            if checksum8(payload) != want {
                return Err(BlockError::ChecksumMismatch);
            }
        }
        Framing::Crc16 => {
            let want = (u16::from(buf[3 + payload_len]) << 8) | u16::from(buf[3 + payload_len + 1]);
            if crc16(payload) != want {
                return Err(BlockError::CrcMismatch);
            }
        }
    }

    if is_duplicate {
        return Err(BlockError::Duplicate);
    }

    Ok(VerifiedBlock { sequence, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_then_verify_round_trips_payload_and_sequence() {
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let data = [0x41u8; 100];
        let n = construct_block(&mut out, Flavor::XCrc, 1, &data, 0x1A);
        let verified = verify_block(&out[..n], Flavor::XCrc, 1, None).unwrap();
        assert_eq!(verified.sequence, 1);
        assert_eq!(&verified.payload[..100], &data[..]);
        assert!(verified.payload[100..].iter().all(|&b| b == 0x1A));
    }

    #[test]
    fn x1k_short_chunk_uses_128_byte_block() {
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let n = construct_block(&mut out, Flavor::X1K, 3, b"abc", 0x1A);
        assert_eq!(out[0], SOH);
        assert_eq!(n, 3 + 128 + 2);
    }

    #[test]
    fn x1k_full_chunk_uses_1024_byte_block() {
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let data = [b'A'; 1024];
        let n = construct_block(&mut out, Flavor::X1K, 1, &data, 0x1A);
        assert_eq!(out[0], STX);
        assert_eq!(n, 3 + 1024 + 2);
    }

    #[test]
    fn duplicate_sequence_is_reported_but_distinct_from_bad_sequence() {
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let n = construct_block(&mut out, Flavor::XNormal, 5, b"hi", 0x1A);
        let err = verify_block(&out[..n], Flavor::XNormal, 5, Some(5)).unwrap_err();
        assert_eq!(err, BlockError::Duplicate);
    }

    #[test]
    fn wrong_checksum_is_rejected() {
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let n = construct_block(&mut out, Flavor::XNormal, 1, b"hi", 0x1A);
        out[n - 1] ^= 0xFF;
        assert_eq!(
            verify_block(&out[..n], Flavor::XNormal, 1, None).unwrap_err(),
            BlockError::ChecksumMismatch
        );
    }

    #[test]
    fn literal_xcrc_hello_block_matches_known_bytes() {
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let n = construct_block(&mut out, Flavor::XCrc, 1, b"hello", 0x1A);
        assert_eq!(out[0], SOH);
        assert_eq!(out[1], 1);
        assert_eq!(out[2], 0xFE);
        assert_eq!(&out[3..8], b"hello");
        assert!(out[8..3 + 128].iter().all(|&b| b == 0x1A));
        let expected_crc = crc16(&out[3..3 + 128]);
        assert_eq!(out[3 + 128], (expected_crc >> 8) as u8);
        assert_eq!(out[3 + 129], (expected_crc & 0xFF) as u8);
        assert_eq!(n, 3 + 128 + 2);
    }
}
