//! C0 set of 7-bit control characters relevant to the scanner and the
//! transfer wire format both draw from.

/// Bell.
pub const BEL: u8 = 0x07;
/// Backspace.
pub const BS: u8 = 0x08;
/// Horizontal tab.
pub const HT: u8 = 0x09;
/// Line feed.
pub const LF: u8 = 0x0A;
/// Vertical tab, treated as LF.
pub const VT: u8 = 0x0B;
/// Form feed, treated as LF.
pub const FF: u8 = 0x0C;
/// Carriage return.
pub const CR: u8 = 0x0D;
/// Shift out: switch to G1.
pub const SO: u8 = 0x0E;
/// Shift in: switch to G0.
pub const SI: u8 = 0x0F;
/// Enquiry: reply with the answer-back string.
pub const ENQ: u8 = 0x05;
/// Cancel: aborts the sequence in progress.
pub const CAN: u8 = 0x18;
/// Substitute: aborts the sequence in progress, same as CAN.
pub const SUB: u8 = 0x1A;
/// Escape: introduces an escape sequence.
pub const ESC: u8 = 0x1B;
/// Delete: ignored.
pub const DEL: u8 = 0x7F;

/// Left bracket: introduces a CSI sequence after ESC.
pub const CSI_INTRODUCER: u8 = b'[';
/// Right bracket: introduces an OSC sequence after ESC.
pub const OSC_INTRODUCER: u8 = b']';
/// P: introduces a DCS sequence after ESC.
pub const DCS_INTRODUCER: u8 = b'P';
/// X: introduces a SOS string after ESC.
pub const SOS_INTRODUCER: u8 = b'X';
/// Caret: introduces a PM string after ESC.
pub const PM_INTRODUCER: u8 = b'^';
/// Underscore: introduces an APC string after ESC.
pub const APC_INTRODUCER: u8 = b'_';
/// Backslash: string terminator (ST).
pub const ST: u8 = b'\\';
