//! Current graphic-rendition state applied to newly written cells (§4.6
//! SGR).

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttrFlags: u16 {
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const UNDERLINE = 1 << 2;
        const BLINK     = 1 << 3;
        const REVERSE   = 1 << 4;
        const INVISIBLE = 1 << 5;
    }
}

/// A basic ANSI color slot (0-7) or the flavor's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Basic(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attrs {
    pub flags: AttrFlags,
    pub foreground: Color,
    pub background: Color,
}

impl Attrs {
    /// `SGR 0`: back to the flavor default.
    pub fn reset(&mut self) {
        *self = Attrs::default();
    }

    /// Applies one decoded SGR parameter (§4.6).
    pub fn apply(&mut self, sgr: rterm_ansi::sgr::Sgr) {
        use rterm_ansi::sgr::Sgr;
        match sgr {
            Sgr::Reset => self.reset(),
            Sgr::Bold => self.flags.insert(AttrFlags::BOLD),
            Sgr::Dim => self.flags.insert(AttrFlags::DIM),
            Sgr::Underline | Sgr::LinuxUnderlineOnDefaultForeground => {
                self.flags.insert(AttrFlags::UNDERLINE);
                if matches!(sgr, Sgr::LinuxUnderlineOnDefaultForeground) {
                    self.foreground = Color::Default;
                }
            }
            Sgr::Blink => self.flags.insert(AttrFlags::BLINK),
            Sgr::Reverse => self.flags.insert(AttrFlags::REVERSE),
            Sgr::Invisible => self.flags.insert(AttrFlags::INVISIBLE),
            Sgr::NormalIntensity => {
                self.flags.remove(AttrFlags::BOLD);
                self.flags.remove(AttrFlags::DIM);
            }
            Sgr::ClearUnderline => self.flags.remove(AttrFlags::UNDERLINE),
            Sgr::ClearBlink => self.flags.remove(AttrFlags::BLINK),
            Sgr::ClearReverse => self.flags.remove(AttrFlags::REVERSE),
            Sgr::ForegroundBasic(n) => self.foreground = Color::Basic(n),
            Sgr::DefaultForeground => self.foreground = Color::Default,
            Sgr::BackgroundBasic(n) => self.background = Color::Basic(n),
            Sgr::DefaultBackground => self.background = Color::Default,
        }
    }
}
