//! Select Graphic Rendition parameter codes (§4.6).

/// One SGR parameter's meaning. Unknown codes are ignored by the dispatch
/// table, matching real terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sgr {
    Reset,
    Bold,
    Dim,
    Underline,
    Blink,
    Reverse,
    /// xterm-only; Linux/VT100 do not implement invisible text.
    Invisible,
    NormalIntensity,
    ClearUnderline,
    ClearBlink,
    ClearReverse,
    ForegroundBasic(u8),
    DefaultForeground,
    /// `38` under the Linux console flavor: underline on with default
    /// foreground, a historical quirk distinct from xterm's extended
    /// (256-color/truecolor) use of the same code.
    LinuxUnderlineOnDefaultForeground,
    BackgroundBasic(u8),
    DefaultBackground,
}

impl Sgr {
    /// Maps one numeric SGR parameter to its meaning.
    #[must_use]
    pub fn from_param(p: u32) -> Option<Sgr> {
        Some(match p {
            0 => Sgr::Reset,
            1 => Sgr::Bold,
            2 => Sgr::Dim,
            4 => Sgr::Underline,
            5 => Sgr::Blink,
            7 => Sgr::Reverse,
            8 => Sgr::Invisible,
            22 => Sgr::NormalIntensity,
            24 => Sgr::ClearUnderline,
            25 => Sgr::ClearBlink,
            27 => Sgr::ClearReverse,
            30..=37 => Sgr::ForegroundBasic((p - 30) as u8),
            38 => Sgr::LinuxUnderlineOnDefaultForeground,
            39 => Sgr::DefaultForeground,
            40..=47 => Sgr::BackgroundBasic((p - 40) as u8),
            49 => Sgr::DefaultBackground,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bold_and_red_foreground() {
        assert_eq!(Sgr::from_param(1), Some(Sgr::Bold));
        assert_eq!(Sgr::from_param(31), Some(Sgr::ForegroundBasic(1)));
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(Sgr::from_param(99), None);
    }
}
