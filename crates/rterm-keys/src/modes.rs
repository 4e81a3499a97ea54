//! The host/terminal modes that change how a [`crate::Key`] encodes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowKeyMode {
    #[default]
    Ansi,
    Vt100,
    Vt52,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeypadMode {
    #[default]
    Numeric,
    Application,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackspaceMode {
    /// BS, 0x08.
    #[default]
    Soft,
    /// DEL, 0x7F.
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderModes {
    pub arrow: ArrowKeyMode,
    pub keypad: KeypadMode,
    pub backspace: BackspaceMode,
    /// Enter sends CR+LF instead of bare CR.
    pub crlf: bool,
}

impl Default for EncoderModes {
    fn default() -> EncoderModes {
        EncoderModes {
            arrow: ArrowKeyMode::default(),
            keypad: KeypadMode::default(),
            backspace: BackspaceMode::default(),
            crlf: false,
        }
    }
}
