//! One screen cell: a glyph plus the rendition it was written with.

use crate::attrs::Attrs;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub attrs: Attrs,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            ch: ' ',
            attrs: Attrs::default(),
        }
    }
}
