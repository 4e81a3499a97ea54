//! Byte-stream scanner: drives `vte::Parser`'s Paul Williams DFA, applies
//! G0/G1 charset translation on `print`, and folds VT52 submode's
//! narrower grammar in as a bypass ahead of the DFA (§4.6).
//!
//! UTF-8 decoding happens inside `vte::Parser` itself (it feeds complete
//! code points to `print`); malformed sequences are replaced with
//! U+FFFD by the same logic the Williams diagram calls for discarding
//! the offending byte and resuming, matching §7.

use smallvec::SmallVec;
use vte::{Params, Perform};

use crate::charset::{self, CharSet};
use crate::event::{Event, Intermediates, Params as OwnedParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivatePrefix {
    /// `?`
    Dec,
    /// `>`
    Secondary,
    /// `<`
    LeftAngle,
    /// `=`
    Equals,
}

impl PrivatePrefix {
    fn from_byte(b: u8) -> Option<PrivatePrefix> {
        match b {
            b'?' => Some(PrivatePrefix::Dec),
            b'>' => Some(PrivatePrefix::Secondary),
            b'<' => Some(PrivatePrefix::LeftAngle),
            b'=' => Some(PrivatePrefix::Equals),
            _ => None,
        }
    }

    fn as_byte(self) -> u8 {
        match self {
            PrivatePrefix::Dec => b'?',
            PrivatePrefix::Secondary => b'>',
            PrivatePrefix::LeftAngle => b'<',
            PrivatePrefix::Equals => b'=',
        }
    }
}

struct DcsCapture {
    private: Option<u8>,
    params: OwnedParams,
    intermediates: Intermediates,
    action: u8,
    data: Vec<u8>,
}

struct EventCollector {
    events: Vec<Event>,
    g0: CharSet,
    g1: CharSet,
    shifted_out: bool,
    dcs: Option<DcsCapture>,
}

impl Default for EventCollector {
    fn default() -> EventCollector {
        EventCollector {
            events: Vec::new(),
            g0: CharSet::default(),
            g1: CharSet::default(),
            shifted_out: false,
            dcs: None,
        }
    }
}

fn owned_params(params: &Params) -> OwnedParams {
    params
        .iter()
        .map(|sub| sub.first().copied().unwrap_or(0))
        .collect()
}

fn split_private(intermediates: &[u8]) -> (Option<u8>, Intermediates) {
    match intermediates.first().and_then(|b| PrivatePrefix::from_byte(*b)) {
        Some(prefix) => (Some(prefix.as_byte()), intermediates[1..].iter().copied().collect()),
        None => (None, intermediates.iter().copied().collect()),
    }
}

impl Perform for EventCollector {
    fn print(&mut self, ch: char) {
        let set = if self.shifted_out { self.g1 } else { self.g0 };
        let translated = if (ch as u32) < 0x100 {
            charset::translate(set, ch as u8)
        } else {
            ch
        };
        self.events.push(Event::Print(translated));
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x0E => self.shifted_out = true,
            0x0F => self.shifted_out = false,
            _ => {}
        }
        self.events.push(Event::Execute(byte));
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        let (private, intermediates) = split_private(intermediates);
        self.events.push(Event::Csi {
            private,
            params: owned_params(params),
            intermediates,
            action: action as u8,
        });
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], ignore: bool, byte: u8) {
        if ignore {
            return;
        }
        if let Some(&marker) = intermediates.first() {
            if marker == b'(' {
                if let Some(cs) = CharSet::from_final_byte(byte) {
                    self.g0 = cs;
                }
                return;
            }
            if marker == b')' {
                if let Some(cs) = CharSet::from_final_byte(byte) {
                    self.g1 = cs;
                }
                return;
            }
        }
        self.events.push(Event::Esc {
            intermediates: intermediates.iter().copied().collect(),
            byte,
        });
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
        self.events.push(Event::Osc {
            params: params.iter().map(|p| p.to_vec()).collect(),
            bell_terminated,
        });
    }

    fn hook(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if ignore {
            return;
        }
        let (private, intermediates) = split_private(intermediates);
        self.dcs = Some(DcsCapture {
            private,
            params: owned_params(params),
            intermediates,
            action: action as u8,
            data: Vec::new(),
        });
    }

    fn put(&mut self, byte: u8) {
        if let Some(dcs) = &mut self.dcs {
            dcs.data.push(byte);
        }
    }

    fn unhook(&mut self) {
        if let Some(dcs) = self.dcs.take() {
            self.events.push(Event::Dcs {
                private: dcs.private,
                params: dcs.params,
                intermediates: dcs.intermediates,
                action: dcs.action,
                data: dcs.data,
            });
        }
    }
}

/// VT52 submode's direct-cursor-address continuation: after `ESC Y` two
/// more bytes (row, then column) follow outside of the DFA's grammar.
/// Every other VT52 command is a single `ESC` + one letter, surfaced as
/// a plain `Event::Esc` for the caller to dispatch per the VT52 grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vt52Pending {
    None,
    SawEsc,
    SawEscY,
    SawEscYRow(u8),
}

/// Drives the scan-state machine over an input byte slice, yielding the
/// events it dispatched (§3 `Event`, §5 byte-slice pump model).
pub struct Scanner {
    parser: vte::Parser,
    collector: EventCollector,
    vt52: bool,
    vt52_pending: Vt52Pending,
}

impl Default for Scanner {
    fn default() -> Scanner {
        Scanner {
            parser: vte::Parser::new(),
            collector: EventCollector::default(),
            vt52: false,
            vt52_pending: Vt52Pending::None,
        }
    }
}

impl Scanner {
    #[must_use]
    pub fn new() -> Scanner {
        Scanner::default()
    }

    #[must_use]
    pub fn is_vt52(&self) -> bool {
        self.vt52
    }

    pub fn enter_vt52(&mut self) {
        self.vt52 = true;
        self.vt52_pending = Vt52Pending::None;
    }

    pub fn exit_vt52(&mut self) {
        self.vt52 = false;
        self.vt52_pending = Vt52Pending::None;
    }

    /// Consumes `input` and returns the events it produced, in order.
    /// CAN/SUB abort any sequence in progress from any state, per the
    /// "anywhere" rule (§4.6); in VT52 submode, only a leading `ESC`
    /// reaches the DFA at all, while the narrower VT52 grammar is
    /// recognized by hand ahead of it.
    pub fn feed(&mut self, input: &[u8]) -> SmallVec<[Event; 16]> {
        self.collector.events.clear();
        for &byte in input {
            if self.vt52 {
                self.feed_vt52_byte(byte);
            } else {
                self.parser.advance(&mut self.collector, byte);
            }
        }
        self.collector.events.drain(..).collect()
    }

    fn feed_vt52_byte(&mut self, byte: u8) {
        match self.vt52_pending {
            Vt52Pending::None => {
                if byte == 0x1B {
                    self.vt52_pending = Vt52Pending::SawEsc;
                } else if byte < 0x20 {
                    self.collector.events.push(Event::Execute(byte));
                } else {
                    self.collector.events.push(Event::Print(byte as char));
                }
            }
            Vt52Pending::SawEsc => {
                self.vt52_pending = Vt52Pending::None;
                if byte == b'Y' {
                    self.vt52_pending = Vt52Pending::SawEscY;
                } else {
                    self.collector.events.push(Event::Esc {
                        intermediates: Intermediates::new(),
                        byte,
                    });
                }
            }
            Vt52Pending::SawEscY => {
                self.vt52_pending = Vt52Pending::SawEscYRow(byte.wrapping_sub(0x20));
            }
            Vt52Pending::SawEscYRow(row) => {
                let col = byte.wrapping_sub(0x20);
                self.collector
                    .events
                    .push(Event::Vt52DirectCursorAddress { row, col });
                self.vt52_pending = Vt52Pending::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csi_2j_dispatches_ed_with_param_2() {
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[2J");
        assert_eq!(
            events.to_vec(),
            vec![Event::Csi {
                private: None,
                params: [2].into_iter().collect(),
                intermediates: Intermediates::new(),
                action: b'J',
            }]
        );
    }

    #[test]
    fn sgr_bold_red_yields_single_csi_event_with_both_params() {
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[1;31m");
        assert_eq!(
            events.to_vec(),
            vec![Event::Csi {
                private: None,
                params: [1, 31].into_iter().collect(),
                intermediates: Intermediates::new(),
                action: b'm',
            }]
        );
    }

    #[test]
    fn plain_text_prints_each_character() {
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"hi");
        assert_eq!(events.to_vec(), vec![Event::Print('h'), Event::Print('i')]);
    }

    #[test]
    fn drawing_charset_translates_print() {
        let mut scanner = Scanner::new();
        scanner.feed(b"\x1b(0");
        let events = scanner.feed(b"q");
        assert_eq!(events.to_vec(), vec![Event::Print('─')]);
    }

    #[test]
    fn private_csi_prefix_is_split_from_params() {
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[?25h");
        assert_eq!(
            events.to_vec(),
            vec![Event::Csi {
                private: Some(b'?'),
                params: [25].into_iter().collect(),
                intermediates: Intermediates::new(),
                action: b'h',
            }]
        );
    }

    #[test]
    fn vt52_direct_cursor_address_subtracts_0x20_bias() {
        let mut scanner = Scanner::new();
        scanner.enter_vt52();
        let events = scanner.feed(b"\x1bY%$");
        assert_eq!(
            events.to_vec(),
            vec![Event::Vt52DirectCursorAddress { row: 5, col: 4 }]
        );
    }

    #[test]
    fn vt52_plain_command_surfaces_as_esc_event() {
        let mut scanner = Scanner::new();
        scanner.enter_vt52();
        let events = scanner.feed(b"\x1bA");
        assert_eq!(
            events.to_vec(),
            vec![Event::Esc {
                intermediates: Intermediates::new(),
                byte: b'A',
            }]
        );
    }
}
