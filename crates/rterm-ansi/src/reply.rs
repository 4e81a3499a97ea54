//! Terminal-to-host reply builders (§6).

use std::io::{self, Write};

use crate::c0::{CSI_INTRODUCER, ESC};
use crate::csi::write_int;

/// Primary Device Attributes reply for a VT102/Linux-console identity:
/// `ESC [ ? 6 c`.
pub fn write_primary_da<W: Write + ?Sized>(sink: &mut W) -> io::Result<usize> {
    sink.write_all(&[ESC, CSI_INTRODUCER, b'?', b'6', b'c'])?;
    Ok(5)
}

/// Secondary Device Attributes reply mimicking xterm's own identity:
/// `ESC [ > 0 ; 10 ; 0 c`.
pub fn write_secondary_da<W: Write + ?Sized>(sink: &mut W) -> io::Result<usize> {
    let mut n = 0;
    sink.write_all(&[ESC, CSI_INTRODUCER, b'>'])?;
    n += 3;
    n += write_int(sink, 0u32)?;
    sink.write_all(b";")?;
    n += 1;
    n += write_int(sink, 10u32)?;
    sink.write_all(b";")?;
    n += 1;
    n += write_int(sink, 0u32)?;
    sink.write_all(b"c")?;
    n += 1;
    Ok(n)
}

/// Device Status Report "terminal OK" reply: `ESC [ 0 n`.
pub fn write_dsr_ok<W: Write + ?Sized>(sink: &mut W) -> io::Result<usize> {
    sink.write_all(&[ESC, CSI_INTRODUCER, b'0', b'n'])?;
    Ok(4)
}

/// Printer-not-connected status reply: `ESC [ ? 1 3 n`.
pub fn write_printer_not_connected<W: Write + ?Sized>(sink: &mut W) -> io::Result<usize> {
    sink.write_all(&[ESC, CSI_INTRODUCER, b'?', b'1', b'3', b'n'])?;
    Ok(6)
}

/// Cursor Position Report: `ESC [ row ; col R`, 1-based coordinates.
pub fn write_cpr<W: Write + ?Sized>(sink: &mut W, row: u32, col: u32) -> io::Result<usize> {
    let mut n = 0;
    sink.write_all(&[ESC, CSI_INTRODUCER])?;
    n += 2;
    n += write_int(sink, row)?;
    sink.write_all(b";")?;
    n += 1;
    n += write_int(sink, col)?;
    sink.write_all(b"R")?;
    n += 1;
    Ok(n)
}

/// Answer-back string sent in response to ENQ. Empty by default, matching
/// most terminal emulators' factory configuration.
pub fn write_answerback<W: Write + ?Sized>(sink: &mut W, answerback: &[u8]) -> io::Result<usize> {
    sink.write_all(answerback)?;
    Ok(answerback.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_da_matches_vt102_linux_identity() {
        let mut out = Vec::new();
        write_primary_da(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?6c");
    }

    #[test]
    fn secondary_da_matches_xterm_identity() {
        let mut out = Vec::new();
        write_secondary_da(&mut out).unwrap();
        assert_eq!(out, b"\x1b[>0;10;0c");
    }

    #[test]
    fn cpr_uses_one_based_row_and_column() {
        let mut out = Vec::new();
        write_cpr(&mut out, 24, 80).unwrap();
        assert_eq!(out, b"\x1b[24;80R");
    }

    #[test]
    fn dsr_ok_and_printer_not_connected() {
        let mut out = Vec::new();
        write_dsr_ok(&mut out).unwrap();
        assert_eq!(out, b"\x1b[0n");
        out.clear();
        write_printer_not_connected(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?13n");
    }
}
