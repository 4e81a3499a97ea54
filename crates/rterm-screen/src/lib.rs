#![warn(clippy::pedantic)]

//! Screen buffer, cursor, and scrolling-region model (§3, §4.7) that
//! consumes `rterm-parser` events.

pub mod attrs;
pub mod cell;
pub mod cursor;
pub mod error;
pub mod grid;
pub mod screen;

pub use attrs::{AttrFlags, Attrs, Color};
pub use cell::Cell;
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use grid::Grid;
pub use screen::Screen;
