//! CSI sequence builders and final-byte dispatch constants (§4.6).

use std::io::{self, Write};

use crate::c0::{CSI_INTRODUCER, ESC};

/// Writes an integer parameter without allocating, mirroring the base
/// library's `write_int` helper.
#[inline]
pub fn write_int<W: Write + ?Sized>(sink: &mut W, value: impl itoa::Integer) -> io::Result<usize> {
    let mut buf = itoa::Buffer::new();
    let s = buf.format(value);
    sink.write_all(s.as_bytes())?;
    Ok(s.len())
}

/// Writes `ESC [ [private] params... finalbyte`, with parameters
/// separated by `;`. Pass an empty `params` slice for a bare final byte
/// (e.g. cursor-save `CSI s`).
pub fn write_csi<W: Write + ?Sized>(
    sink: &mut W,
    private: Option<u8>,
    params: &[u32],
    intermediate: Option<u8>,
    finalbyte: u8,
) -> io::Result<usize> {
    let mut n = 0;
    sink.write_all(&[ESC, CSI_INTRODUCER])?;
    n += 2;
    if let Some(p) = private {
        sink.write_all(&[p])?;
        n += 1;
    }
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            sink.write_all(b";")?;
            n += 1;
        }
        n += write_int(sink, *param)?;
    }
    if let Some(i) = intermediate {
        sink.write_all(&[i])?;
        n += 1;
    }
    sink.write_all(&[finalbyte])?;
    n += 1;
    Ok(n)
}

/// CSI final bytes that carry a meaningful dispatch action (§4.6); the
/// unlisted final bytes are consumed and discarded same as any other
/// unknown sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiFinal {
    /// `@` Insert Character.
    Ich,
    /// `A` Cursor Up.
    Cuu,
    /// `B` Cursor Down.
    Cud,
    /// `C` Cursor Forward.
    Cuf,
    /// `D` Cursor Back.
    Cub,
    /// `E` Cursor Next Line.
    Cnl,
    /// `F` Cursor Previous Line.
    Cpl,
    /// `G` Cursor Horizontal Absolute.
    Cha,
    /// `H` Cursor Position.
    Cup,
    /// `I` Cursor Horizontal Tab (xterm).
    Cht,
    /// `J` Erase in Display.
    Ed,
    /// `K` Erase in Line.
    El,
    /// `L` Insert Line.
    Il,
    /// `M` Delete Line.
    Dl,
    /// `P` Delete Character.
    Dch,
    /// `S` Scroll Up (xterm).
    Su,
    /// `T` Scroll Down (xterm).
    Sd,
    /// `X` Erase Character.
    Ech,
    /// `Z` Cursor Backward Tab.
    Cbt,
    /// `` ` `` Horizontal Position Absolute.
    Hpa,
    /// `a` Horizontal Position Relative.
    Hpr,
    /// `b` Repeat preceding character (xterm).
    Rep,
    /// `c` Device Attributes.
    Da,
    /// `d` Vertical Position Absolute.
    Vpa,
    /// `e` Vertical Position Relative.
    Vpr,
    /// `f` Horizontal and Vertical Position.
    Hvp,
    /// `g` Tab Clear.
    Tbc,
    /// `h` Set Mode.
    SetMode,
    /// `l` Reset Mode.
    ResetMode,
    /// `m` Select Graphic Rendition.
    Sgr,
    /// `n` Device Status Report.
    Dsr,
    /// `q` Load LEDs (DECLL).
    Decll,
    /// `r` Set Top and Bottom Margins (DECSTBM).
    Decstbm,
    /// `s` Save Cursor (xterm, ambiguous with DECSTBM in some contexts).
    SaveCursor,
    /// `u` Restore Cursor (xterm).
    RestoreCursor,
    /// `x` Request Terminal Parameters (DECREQTPARM).
    Decreqtparm,
}

impl CsiFinal {
    /// Maps a final byte to its dispatch action. Returns `None` for
    /// final bytes with no handler (consumed and discarded per §7).
    #[must_use]
    pub fn from_byte(b: u8) -> Option<CsiFinal> {
        Some(match b {
            b'@' => CsiFinal::Ich,
            b'A' => CsiFinal::Cuu,
            b'B' => CsiFinal::Cud,
            b'C' => CsiFinal::Cuf,
            b'D' => CsiFinal::Cub,
            b'E' => CsiFinal::Cnl,
            b'F' => CsiFinal::Cpl,
            b'G' => CsiFinal::Cha,
            b'H' => CsiFinal::Cup,
            b'I' => CsiFinal::Cht,
            b'J' => CsiFinal::Ed,
            b'K' => CsiFinal::El,
            b'L' => CsiFinal::Il,
            b'M' => CsiFinal::Dl,
            b'P' => CsiFinal::Dch,
            b'S' => CsiFinal::Su,
            b'T' => CsiFinal::Sd,
            b'X' => CsiFinal::Ech,
            b'Z' => CsiFinal::Cbt,
            b'`' => CsiFinal::Hpa,
            b'a' => CsiFinal::Hpr,
            b'b' => CsiFinal::Rep,
            b'c' => CsiFinal::Da,
            b'd' => CsiFinal::Vpa,
            b'e' => CsiFinal::Vpr,
            b'f' => CsiFinal::Hvp,
            b'g' => CsiFinal::Tbc,
            b'h' => CsiFinal::SetMode,
            b'l' => CsiFinal::ResetMode,
            b'm' => CsiFinal::Sgr,
            b'n' => CsiFinal::Dsr,
            b'q' => CsiFinal::Decll,
            b'r' => CsiFinal::Decstbm,
            b's' => CsiFinal::SaveCursor,
            b'u' => CsiFinal::RestoreCursor,
            b'x' => CsiFinal::Decreqtparm,
            _ => return None,
        })
    }
}
