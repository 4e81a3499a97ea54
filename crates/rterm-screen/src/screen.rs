//! Ties the grid, cursor, and rendition state together and applies the
//! events `rterm-parser` dispatches (§3 `Screen`, §4.6, §4.7).

use rterm_ansi::csi::CsiFinal;
use rterm_ansi::sgr::Sgr;
use rterm_parser::{Event, TabStops};

use crate::attrs::Attrs;
use crate::cursor::Cursor;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, Default)]
struct SavedCursor {
    row: usize,
    col: usize,
    attrs: Attrs,
    origin_mode: bool,
}

pub struct Screen {
    pub grid: Grid,
    pub cursor: Cursor,
    pub attrs: Attrs,
    pub tab_stops: TabStops,
    saved: Option<SavedCursor>,
}

impl Screen {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Screen {
        Screen {
            grid: Grid::new(width, height),
            cursor: Cursor::new(height),
            attrs: Attrs::default(),
            tab_stops: TabStops::new(width),
            saved: None,
        }
    }

    /// Reports the current cursor position, for wiring into
    /// `rterm_parser::ParserSession::set_cursor` ahead of a CPR reply.
    #[must_use]
    pub fn cursor_position(&self) -> (usize, usize) {
        (self.cursor.row, self.cursor.col)
    }

    pub fn apply_all(&mut self, events: &[Event]) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Print(ch) => self.print(*ch),
            Event::Execute(byte) => self.execute(*byte),
            Event::Csi {
                private,
                params,
                action,
                ..
            } => self.csi(*private, params, *action),
            Event::Esc { intermediates, byte } => self.esc(intermediates, *byte),
            Event::Vt52DirectCursorAddress { row, col } => {
                self.cursor.move_to(*row as usize, *col as usize, &self.grid);
            }
            Event::Osc { .. } | Event::Dcs { .. } => {}
        }
    }

    fn print(&mut self, ch: char) {
        self.grid
            .put(self.cursor.row, self.cursor.col, ch, self.attrs);
        self.cursor.advance_after_print(&mut self.grid, self.attrs);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x0A | 0x0B | 0x0C => self.cursor.index(&mut self.grid, self.attrs),
            0x0D => self.cursor.col = 0,
            0x08 => self.cursor.col = self.cursor.col.saturating_sub(1),
            0x09 => self.cursor.col = self.tab_stops.next_after(self.cursor.col),
            _ => {}
        }
    }

    fn param(params: &[u16], index: usize, default: u16) -> u16 {
        params.get(index).copied().filter(|&p| p != 0).unwrap_or(default)
    }

    #[allow(clippy::too_many_lines)]
    fn csi(&mut self, private: Option<u8>, params: &[u16], action: u8) {
        let Some(final_byte) = CsiFinal::from_byte(action) else {
            return;
        };
        let n = Self::param(params, 0, 1) as usize;
        let max_row = self.grid.height().saturating_sub(1);
        let max_col = self.grid.width().saturating_sub(1);
        match final_byte {
            CsiFinal::Cuu => self.cursor.row = self.cursor.row.saturating_sub(n),
            CsiFinal::Cud => self.cursor.row = (self.cursor.row + n).min(max_row),
            CsiFinal::Cuf => self.cursor.col = (self.cursor.col + n).min(max_col),
            CsiFinal::Cub => self.cursor.col = self.cursor.col.saturating_sub(n),
            CsiFinal::Cnl => {
                self.cursor.col = 0;
                self.cursor.row = (self.cursor.row + n).min(max_row);
            }
            CsiFinal::Cpl => {
                self.cursor.col = 0;
                self.cursor.row = self.cursor.row.saturating_sub(n);
            }
            CsiFinal::Cha => self.cursor.col = n.saturating_sub(1).min(max_col),
            CsiFinal::Cup | CsiFinal::Hvp => {
                let row = (Self::param(params, 0, 1) as usize).saturating_sub(1);
                let col = (Self::param(params, 1, 1) as usize).saturating_sub(1);
                self.cursor.move_to(row, col, &self.grid);
            }
            CsiFinal::Cht => {
                for _ in 0..n {
                    self.cursor.col = self.tab_stops.next_after(self.cursor.col);
                }
            }
            CsiFinal::Cbt => {
                self.cursor.col = self.tab_stops.back_by(self.cursor.col, n);
            }
            CsiFinal::Ed => {
                let which = Self::param(params, 0, 0);
                self.grid
                    .erase_display(which, self.cursor.row, self.cursor.col, self.attrs);
            }
            CsiFinal::El => {
                let which = Self::param(params, 0, 0);
                self.grid
                    .erase_line(which, self.cursor.row, self.cursor.col, self.attrs);
            }
            CsiFinal::Il => self.grid.insert_lines(
                self.cursor.row,
                self.cursor.region.bottom,
                n,
                self.attrs,
            ),
            CsiFinal::Dl => self.grid.delete_lines(
                self.cursor.row,
                self.cursor.region.bottom,
                n,
                self.attrs,
            ),
            CsiFinal::Dch => {
                self.grid
                    .delete_chars(self.cursor.row, self.cursor.col, n, self.attrs);
            }
            CsiFinal::Ich => {
                self.grid
                    .insert_chars(self.cursor.row, self.cursor.col, n, self.attrs);
            }
            CsiFinal::Ech => {
                self.grid
                    .erase_chars(self.cursor.row, self.cursor.col, n, self.attrs);
            }
            CsiFinal::Hpa => self.cursor.col = n.saturating_sub(1).min(max_col),
            CsiFinal::Hpr => self.cursor.col = (self.cursor.col + n).min(max_col),
            CsiFinal::Vpa => self.cursor.row = n.saturating_sub(1).min(max_row),
            CsiFinal::Vpr => self.cursor.row = (self.cursor.row + n).min(max_row),
            CsiFinal::Tbc => match Self::param(params, 0, 0) {
                3 => self.tab_stops.clear_all(),
                _ => self.tab_stops.clear(self.cursor.col),
            },
            CsiFinal::Decstbm => {
                let top = Self::param(params, 0, 1) as usize;
                let bottom = Self::param(params, 1, self.grid.height() as u16) as usize;
                self.cursor
                    .set_scroll_region(top, bottom, self.grid.height());
            }
            CsiFinal::Sgr => {
                if params.is_empty() {
                    self.attrs.reset();
                }
                for &p in params {
                    if let Some(sgr) = Sgr::from_param(u32::from(p)) {
                        self.attrs.apply(sgr);
                    }
                }
            }
            CsiFinal::SetMode | CsiFinal::ResetMode => {
                let set = final_byte == CsiFinal::SetMode;
                for &p in params {
                    self.apply_mode(private, u32::from(p), set);
                }
            }
            _ => {}
        }
    }

    fn apply_mode(&mut self, private: Option<u8>, number: u32, set: bool) {
        let Some(mode) = rterm_ansi::mode::Mode::from_number(number, private == Some(b'?'))
        else {
            return;
        };
        match mode {
            rterm_ansi::mode::Mode::Decom => self.cursor.origin_mode = set,
            rterm_ansi::mode::Mode::Decawm => self.cursor.auto_wrap = set,
            _ => {}
        }
    }

    fn esc(&mut self, intermediates: &[u8], byte: u8) {
        if !intermediates.is_empty() {
            return;
        }
        match byte {
            b'7' => {
                self.saved = Some(SavedCursor {
                    row: self.cursor.row,
                    col: self.cursor.col,
                    attrs: self.attrs,
                    origin_mode: self.cursor.origin_mode,
                });
            }
            b'8' => {
                if let Some(saved) = self.saved {
                    self.cursor.row = saved.row;
                    self.cursor.col = saved.col;
                    self.attrs = saved.attrs;
                    self.cursor.origin_mode = saved.origin_mode;
                }
            }
            b'c' => {
                let (width, height) = (self.grid.width(), self.grid.height());
                self.grid = Grid::new(width, height);
                self.cursor = Cursor::new(height);
                self.attrs = Attrs::default();
                self.tab_stops = TabStops::new(width);
                self.saved = None;
            }
            b'D' => self.cursor.index(&mut self.grid, self.attrs),
            b'M' => self.cursor.reverse_index(&mut self.grid, self.attrs),
            b'E' => self.cursor.next_line(&mut self.grid, self.attrs),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rterm_parser::Scanner;

    #[test]
    fn csi_2j_erases_entire_screen() {
        let mut screen = Screen::new(10, 5);
        screen.print('x');
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[2J");
        screen.apply_all(&events);
        assert_eq!(screen.grid.cell(0, 0).ch, ' ');
    }

    #[test]
    fn sgr_bold_red_sets_attrs_for_next_print() {
        let mut screen = Screen::new(10, 5);
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[1;31m");
        screen.apply_all(&events);
        screen.print('x');
        let attrs = screen.grid.cell(0, 0).attrs;
        assert!(attrs.flags.contains(crate::attrs::AttrFlags::BOLD));
        assert_eq!(attrs.foreground, crate::attrs::Color::Basic(1));
    }

    #[test]
    fn decstbm_then_ind_at_bottom_scrolls_region_only() {
        let mut screen = Screen::new(4, 5);
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[2;4r");
        screen.apply_all(&events);
        assert_eq!((screen.cursor.region.top, screen.cursor.region.bottom), (1, 3));
        assert_eq!((screen.cursor.row, screen.cursor.col), (1, 0));
    }

    #[test]
    fn tab_after_ris_lands_on_eight_column_ladder() {
        let mut screen = Screen::new(80, 24);
        let mut scanner = Scanner::new();
        screen.apply_all(&scanner.feed(b"\x1bc"));
        screen.execute(0x09);
        assert_eq!(screen.cursor.col, 8);
    }

    #[test]
    fn cursor_position_report_reflects_cup() {
        let mut screen = Screen::new(80, 24);
        let mut scanner = Scanner::new();
        let events = scanner.feed(b"\x1b[10;5H");
        screen.apply_all(&events);
        assert_eq!(screen.cursor_position(), (9, 4));
    }
}
