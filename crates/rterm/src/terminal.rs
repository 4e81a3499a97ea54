//! Wires a [`rterm_parser::ParserSession`] to a [`rterm_screen::Screen`]:
//! host bytes go in, screen-affecting events are applied, and the
//! cursor position feeds back so CPR replies stay accurate (§6).

use rterm_parser::ParserSession;
use rterm_screen::Screen;

/// One end of a terminal connection: incoming host bytes update the
/// screen, outgoing replies (DA/DSR/CPR/answerback) are written directly
/// into the caller's output buffer.
pub struct Terminal {
    parser: ParserSession,
    pub screen: Screen,
}

impl Terminal {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Terminal {
        Terminal {
            parser: ParserSession::new(),
            screen: Screen::new(width, height),
        }
    }

    /// Sets the string ENQ triggers (§6).
    pub fn set_answerback(&mut self, answerback: Vec<u8>) {
        self.parser.answerback = answerback;
    }

    /// Loads a translate table (§6) applied to incoming host bytes.
    pub fn load_translate_table(&mut self, table: rterm_parser::TranslateTable) {
        self.parser.load_translate_table(table);
    }

    /// Feeds `input` through the parser and applies the resulting events
    /// to the screen, writing any host-query replies into `out`.
    ///
    /// # Panics
    /// Panics if `out` has fewer than [`rterm_core::OUTPUT_BYTE_BUDGET`]
    /// free bytes.
    pub fn feed(&mut self, input: &[u8], out: &mut [u8]) -> usize {
        let (events, produced) = self.parser.pump(input, out);
        self.screen.apply_all(&events);
        let (row, col) = self.screen.cursor_position();
        self.parser.set_cursor(row as u32, col as u32);
        produced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_text_lands_on_the_screen_grid() {
        let mut term = Terminal::new(80, 24);
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let produced = term.feed(b"hi", &mut out);
        assert_eq!(produced, 0);
        assert_eq!(term.screen.grid.cell(0, 0).ch, 'h');
        assert_eq!(term.screen.grid.cell(0, 1).ch, 'i');
    }

    #[test]
    fn cursor_position_report_tracks_the_screen_after_movement() {
        let mut term = Terminal::new(80, 24);
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        term.feed(b"\x1b[5;10H", &mut out);
        let produced = term.feed(b"\x1b[6n", &mut out);
        assert_eq!(&out[..produced], b"\x1b[5;10R");
    }

    #[test]
    fn answerback_round_trips_through_the_parser() {
        let mut term = Terminal::new(80, 24);
        term.set_answerback(b"rterm".to_vec());
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let produced = term.feed(&[0x05], &mut out);
        assert_eq!(&out[..produced], b"rterm");
    }
}
