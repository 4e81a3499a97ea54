//! Owned, borrow-free mirror of the scan dispatch callbacks (§3 `Event`).
//!
//! `vte::Perform` methods only live for the duration of one `advance` call;
//! the scanner copies what it needs into these owned variants so callers
//! (`rterm-screen`) can buffer a batch before reacting to any of it.

use smallvec::SmallVec;

/// Numeric CSI/DCS parameters. Sub-parameters (colon-separated, used by
/// truecolor SGR) are collapsed to their first value; no control function
/// in this scanner's dispatch table currently needs the rest.
pub type Params = SmallVec<[u16; 8]>;
pub type Intermediates = SmallVec<[u8; 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A printable character, already UTF-8-decoded and charset-translated.
    Print(char),
    /// A C0/C1 control byte dispatched immediately (LF, CR, BS, ...).
    Execute(u8),
    /// `ESC [ params intermediates action`.
    Csi {
        private: Option<u8>,
        params: Params,
        intermediates: Intermediates,
        action: u8,
    },
    /// `ESC intermediates byte`, outside of CSI/DCS/OSC.
    Esc { intermediates: Intermediates, byte: u8 },
    /// `ESC ] params ST|BEL`.
    Osc {
        params: Vec<Vec<u8>>,
        bell_terminated: bool,
    },
    /// DCS string body, collected then discarded per §4.6 except for the
    /// Linux palette forms which the caller may special-case on `action`.
    Dcs {
        private: Option<u8>,
        params: Params,
        intermediates: Intermediates,
        action: u8,
        data: Vec<u8>,
    },
    /// VT52 `ESC Y row col` direct cursor address; row/col already have
    /// the `0x20` bias subtracted.
    Vt52DirectCursorAddress { row: u8, col: u8 },
}
