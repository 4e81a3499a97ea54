//! Ties the scanner to the terminal-reply side of the byte-slice pump
//! contract (§5, §6): events that are pure host queries (DA, DSR, ENQ)
//! are answered here and never leave the crate; everything else is
//! handed back to the caller (`rterm-screen`) to apply to the grid.

use rterm_core::assert_output_budget;
use rterm_ansi::reply;

use crate::event::Event;
use crate::scanner::Scanner;
use crate::translate::TranslateTable;

/// Parser-side session state (§3 `ParserState` minus the scan-state
/// machinery, which lives inside [`Scanner`]).
pub struct ParserSession {
    scanner: Scanner,
    pub translate: TranslateTable,
    pub answerback: Vec<u8>,
    cursor_row: u32,
    cursor_col: u32,
}

impl ParserSession {
    #[must_use]
    pub fn new() -> ParserSession {
        ParserSession {
            scanner: Scanner::new(),
            translate: TranslateTable::default(),
            answerback: Vec::new(),
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    /// Loads a translate table (§6) to remap host bytes before display
    /// and key-encoder output before it reaches the transport.
    pub fn load_translate_table(&mut self, table: TranslateTable) {
        self.translate = table;
    }

    /// Updates the cursor position the session reports for CPR (§6),
    /// kept in sync by the caller as it applies screen-affecting events.
    pub fn set_cursor(&mut self, row: u32, col: u32) {
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Consumes `input`, answers any host-query events directly into
    /// `out`, and returns the remaining events for the caller to apply.
    ///
    /// # Panics
    /// Panics if `out` has fewer than [`rterm_core::OUTPUT_BYTE_BUDGET`]
    /// free bytes, per the byte-budget contract shared with `rterm-xfer`.
    pub fn pump(&mut self, input: &[u8], out: &mut [u8]) -> (Vec<Event>, usize) {
        assert_output_budget(out);
        let events = self.scanner.feed(input);
        let mut produced = 0;
        let mut remaining = Vec::with_capacity(events.len());
        for event in events {
            let event = match event {
                Event::Print(ch) => {
                    let translated = self.translate.translate_input(ch as u32);
                    char::from_u32(translated).map_or(Event::Print(ch), Event::Print)
                }
                other => other,
            };
            match &event {
                Event::Execute(0x05) => {
                    let mut sink = &mut out[produced..];
                    produced += reply::write_answerback(&mut sink, &self.answerback).unwrap_or(0);
                }
                Event::Csi {
                    private: None,
                    params,
                    action: b'c',
                    ..
                } if params.first().copied().unwrap_or(0) == 0 => {
                    let mut sink = &mut out[produced..];
                    produced += reply::write_primary_da(&mut sink).unwrap_or(0);
                }
                Event::Csi {
                    private: Some(b'>'),
                    action: b'c',
                    ..
                } => {
                    let mut sink = &mut out[produced..];
                    produced += reply::write_secondary_da(&mut sink).unwrap_or(0);
                }
                Event::Csi {
                    private: None,
                    params,
                    action: b'n',
                    ..
                } if params.first().copied() == Some(5) => {
                    let mut sink = &mut out[produced..];
                    produced += reply::write_dsr_ok(&mut sink).unwrap_or(0);
                }
                Event::Csi {
                    private: None,
                    params,
                    action: b'n',
                    ..
                } if params.first().copied() == Some(6) => {
                    let mut sink = &mut out[produced..];
                    produced += reply::write_cpr(
                        &mut sink,
                        self.cursor_row + 1,
                        self.cursor_col + 1,
                    )
                    .unwrap_or(0);
                }
                Event::Csi {
                    private: Some(b'?'),
                    params,
                    action: b'n',
                    ..
                } if params.first().copied() == Some(15) => {
                    let mut sink = &mut out[produced..];
                    produced += reply::write_printer_not_connected(&mut sink).unwrap_or(0);
                }
                _ => {
                    remaining.push(event);
                    continue;
                }
            }
        }
        (remaining, produced)
    }
}

impl Default for ParserSession {
    fn default() -> ParserSession {
        ParserSession::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enq_emits_configured_answerback() {
        let mut session = ParserSession::new();
        session.answerback = b"rterm".to_vec();
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let (remaining, produced) = session.pump(&[0x05], &mut out);
        assert!(remaining.is_empty());
        assert_eq!(&out[..produced], b"rterm");
    }

    #[test]
    fn da_request_answers_with_vt102_identity_and_absorbs_event() {
        let mut session = ParserSession::new();
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let (remaining, produced) = session.pump(b"\x1b[0c", &mut out);
        assert!(remaining.is_empty());
        assert_eq!(&out[..produced], b"\x1b[?6c");
    }

    #[test]
    fn cpr_request_uses_one_based_tracked_cursor() {
        let mut session = ParserSession::new();
        session.set_cursor(23, 79);
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let (remaining, produced) = session.pump(b"\x1b[6n", &mut out);
        assert!(remaining.is_empty());
        assert_eq!(&out[..produced], b"\x1b[24;80R");
    }

    #[test]
    fn non_reply_events_pass_through_unanswered() {
        let mut session = ParserSession::new();
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let (remaining, produced) = session.pump(b"\x1b[2J", &mut out);
        assert_eq!(produced, 0);
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn loaded_translate_table_remaps_incoming_print_events() {
        let mut session = ParserSession::new();
        session.load_translate_table(TranslateTable::parse("[input]\n65 = 66\n"));
        let mut out = vec![0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let (remaining, _) = session.pump(b"A", &mut out);
        assert_eq!(remaining, vec![Event::Print('B')]);
    }
}
