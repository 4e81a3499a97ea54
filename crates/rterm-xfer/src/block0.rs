//! Ymodem block-0 batch metadata encoding/decoding (§6).
//!
//! Payload layout: ASCII filename, NUL, ASCII decimal size, space, ASCII
//! octal modification time, NUL, then NUL padding to the block size.

use crate::session::BatchFileEntry;

/// Encodes `entry` into `payload` (already sized 128 or 1024 and expected
/// to be zero-filled by the caller, since NUL is this format's padding
/// byte, not [`crate::config::Config::pad_byte`]).
pub fn encode_block0(payload: &mut [u8], entry: &BatchFileEntry) {
    payload.fill(0);
    if entry.is_end_of_batch() {
        return;
    }
    let body = format!("{}\0{} {:o}\0", entry.name, entry.size, entry.mtime);
    let bytes = body.as_bytes();
    assert!(bytes.len() <= payload.len(), "block-0 metadata too long for block size");
    payload[..bytes.len()].copy_from_slice(bytes);
}

/// Decodes a block-0 payload. An all-NUL (or otherwise empty-filename)
/// payload is the end-of-batch sentinel.
#[must_use]
pub fn decode_block0(payload: &[u8]) -> BatchFileEntry {
    let end = payload.iter().position(|&b| b == 0).unwrap_or(payload.len());
    if end == 0 {
        return BatchFileEntry::end_of_batch();
    }
    let name = String::from_utf8_lossy(&payload[..end]).into_owned();

    let rest_start = end + 1;
    let rest_end = payload[rest_start..]
        .iter()
        .position(|&b| b == 0)
        .map_or(payload.len(), |p| rest_start + p);
    let rest = String::from_utf8_lossy(&payload[rest_start..rest_end]);
    let mut fields = rest.split(' ');
    let size = fields.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
    let mtime = fields
        .next()
        .and_then(|s| u64::from_str_radix(s, 8).ok())
        .unwrap_or(0);

    BatchFileEntry { name, size, mtime }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_name_size_and_octal_mtime() {
        let entry = BatchFileEntry { name: "t".into(), size: 5, mtime: 0o1 };
        let mut payload = [0u8; 128];
        encode_block0(&mut payload, &entry);
        assert_eq!(&payload[..6], b"t\x005 1\0");
        let decoded = decode_block0(&payload);
        assert_eq!(decoded, entry);
    }

    #[test]
    fn empty_entry_decodes_as_end_of_batch() {
        let payload = [0u8; 128];
        assert!(decode_block0(&payload).is_end_of_batch());
    }

    #[test]
    fn end_of_batch_encodes_as_all_nul() {
        let mut payload = [0xFFu8; 128];
        encode_block0(&mut payload, &BatchFileEntry::end_of_batch());
        assert!(payload.iter().all(|&b| b == 0));
    }
}
