//! Cursor position, scrolling region, and the origin/auto-wrap modes
//! that change how both are interpreted (§4.7).

use crate::attrs::Attrs;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy)]
pub struct Region {
    /// 0-indexed, inclusive.
    pub top: usize,
    /// 0-indexed, inclusive.
    pub bottom: usize,
}

#[derive(Debug, Clone)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
    pub region: Region,
    /// DECOM: CUP/HVP addresses become region-relative.
    pub origin_mode: bool,
    /// DECAWM: printing at the right edge wraps instead of overwriting.
    pub auto_wrap: bool,
    pending_wrap: bool,
}

impl Cursor {
    #[must_use]
    pub fn new(height: usize) -> Cursor {
        Cursor {
            row: 0,
            col: 0,
            region: Region {
                top: 0,
                bottom: height.saturating_sub(1),
            },
            origin_mode: false,
            auto_wrap: true,
            pending_wrap: false,
        }
    }

    /// `DECSTBM`: sets the scrolling region, 1-indexed in the wire
    /// format. Out-of-range or inverted bounds reset to the full
    /// screen; any successful set homes the cursor.
    pub fn set_scroll_region(&mut self, top_1based: usize, bottom_1based: usize, height: usize) {
        let top = top_1based.saturating_sub(1);
        let bottom = bottom_1based.saturating_sub(1);
        self.region = if top < bottom && bottom < height {
            Region { top, bottom }
        } else {
            Region {
                top: 0,
                bottom: height.saturating_sub(1),
            }
        };
        self.home();
    }

    /// Homes the cursor to (0,0) of the current origin (region top if
    /// `DECOM` is set, else the screen's absolute top).
    pub fn home(&mut self) {
        self.row = if self.origin_mode { self.region.top } else { 0 };
        self.col = 0;
        self.pending_wrap = false;
    }

    /// Resolves a CUP/HVP target, which is region-relative under DECOM.
    #[must_use]
    pub fn resolve_position(&self, row: usize, col: usize) -> (usize, usize) {
        if self.origin_mode {
            (self.region.top + row, col)
        } else {
            (row, col)
        }
    }

    /// Moves to a CUP/HVP target, resolved against the origin (§4.7) and
    /// clamped to the grid so an out-of-range request under `DECOM`
    /// cannot place the cursor past the physical screen.
    pub fn move_to(&mut self, row: usize, col: usize, grid: &Grid) {
        let (row, col) = self.resolve_position(row, col);
        self.row = row.min(grid.height().saturating_sub(1));
        self.col = col.min(grid.width().saturating_sub(1));
        self.pending_wrap = false;
    }

    /// `IND`: moves down one line, scrolling the region up if already
    /// at the bottom.
    pub fn index(&mut self, grid: &mut Grid, attrs: Attrs) {
        if self.row == self.region.bottom {
            scroll_up(grid, self.region, 1, attrs);
        } else {
            self.row += 1;
        }
        self.pending_wrap = false;
    }

    /// `RI`: moves up one line, scrolling the region down if already
    /// at the top.
    pub fn reverse_index(&mut self, grid: &mut Grid, attrs: Attrs) {
        if self.row == self.region.top {
            scroll_down(grid, self.region, 1, attrs);
        } else {
            self.row -= 1;
        }
        self.pending_wrap = false;
    }

    /// `NEL`: carriage return plus `IND`.
    pub fn next_line(&mut self, grid: &mut Grid, attrs: Attrs) {
        self.col = 0;
        self.index(grid, attrs);
    }

    /// Advances the cursor one column after printing a glyph, wrapping
    /// to the next line (scrolling if needed) when `DECAWM` is set and
    /// the right edge was just occupied.
    pub fn advance_after_print(&mut self, grid: &mut Grid, attrs: Attrs) {
        if self.pending_wrap {
            self.col = 0;
            self.index(grid, attrs);
            self.pending_wrap = false;
        }
        if self.col + 1 >= grid.width() {
            if self.auto_wrap {
                self.pending_wrap = true;
            }
        } else {
            self.col += 1;
        }
    }
}

/// Scrolls `region` up by `lines`, losing the top `lines` rows and
/// revealing blank rows at the bottom.
pub fn scroll_up(grid: &mut Grid, region: Region, lines: usize, attrs: Attrs) {
    grid.delete_lines(region.top, region.bottom, lines, attrs);
}

/// Scrolls `region` down by `lines`, losing the bottom `lines` rows and
/// revealing blank rows at the top.
pub fn scroll_down(grid: &mut Grid, region: Region, lines: usize, attrs: Attrs) {
    grid.insert_lines(region.top, region.bottom, lines, attrs);
}
