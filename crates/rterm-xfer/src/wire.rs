//! Wire-level control bytes, bit-exact with the base protocol.

/// Start of 128-byte block.
pub const SOH: u8 = 0x01;
/// Start of 1024-byte block.
pub const STX: u8 = 0x02;
/// End of transmission.
pub const EOT: u8 = 0x04;
/// Acknowledge.
pub const ACK: u8 = 0x06;
/// Negative acknowledge.
pub const NAK: u8 = 0x15;
/// Cancel.
pub const CAN: u8 = 0x18;
/// Substitute; used to pad short final blocks.
pub const SUB: u8 = 0x1A;

/// Header byte for a 128-byte block.
pub const BLOCK_HEADER_128: u8 = SOH;
/// Header byte for a 1024-byte block.
pub const BLOCK_HEADER_1024: u8 = STX;
