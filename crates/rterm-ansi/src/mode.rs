//! DEC private and ANSI mode numbers toggled via CSI `h`/`l` (§4.6).

/// A mode settable via `CSI h` / `CSI l`, DEC-private when the sequence
/// carries the `?` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// DEC private 1: cursor-key application mode (DECCKM).
    Deckcm,
    /// DEC private 2: VT52/ANSI mode, also keyboard-action related (DECANM/KAM).
    DecanmKam,
    /// DEC private 3: 80/132 column mode (DECCOLM).
    Deccolm,
    /// DEC private 4: scrolling mode / insert-replace mode (DECSCLM/IRM).
    DecsclmIrm,
    /// DEC private 5: reverse video (DECSCNM).
    Decscnm,
    /// DEC private 6: origin mode (DECOM).
    Decom,
    /// DEC private 7: auto-wrap mode (DECAWM).
    Decawm,
    /// DEC private 8: auto-repeat mode (DECARM).
    Decarm,
    /// DEC private 12: send/receive mode (SRM).
    Srm,
    /// ANSI (non-private) 20: line feed/new line mode (LNM).
    Lnm,
    /// DEC private 25: cursor visibility (DECTCEM).
    CursorVisible,
    /// DEC private 1000: xterm X11 mouse reporting.
    XtermMouseX11,
    /// DEC private 1002: xterm cell-motion mouse tracking.
    XtermMouseCellMotion,
    /// DEC private 1003: xterm all-motion mouse tracking.
    XtermMouseAllMotion,
    /// DEC private 1005: UTF-8 mouse coordinates.
    XtermMouseUtf8,
}

impl Mode {
    /// Maps a mode number to its meaning. `private` must be `true` for
    /// the `?`-prefixed (DEC private) numbering space.
    #[must_use]
    pub fn from_number(number: u32, private: bool) -> Option<Mode> {
        Some(match (private, number) {
            (true, 1) => Mode::Deckcm,
            (true, 2) => Mode::DecanmKam,
            (true, 3) => Mode::Deccolm,
            (true, 4) => Mode::DecsclmIrm,
            (true, 5) => Mode::Decscnm,
            (true, 6) => Mode::Decom,
            (true, 7) => Mode::Decawm,
            (true, 8) => Mode::Decarm,
            (true, 12) => Mode::Srm,
            (false, 20) => Mode::Lnm,
            (true, 25) => Mode::CursorVisible,
            (true, 1000) => Mode::XtermMouseX11,
            (true, 1002) => Mode::XtermMouseCellMotion,
            (true, 1003) => Mode::XtermMouseAllMotion,
            (true, 1005) => Mode::XtermMouseUtf8,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_and_ansi_numbering_spaces_dont_collide() {
        assert_eq!(Mode::from_number(20, false), Some(Mode::Lnm));
        assert_eq!(Mode::from_number(20, true), None);
        assert_eq!(Mode::from_number(25, true), Some(Mode::CursorVisible));
    }
}
