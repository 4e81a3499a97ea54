#![warn(clippy::pedantic)]

//! Umbrella crate: re-exports the transfer engine and the terminal
//! parser/screen/keyboard stack, plus [`Terminal`] glue between them.

pub mod terminal;

pub use terminal::Terminal;

pub use rterm_ansi as ansi;
pub use rterm_core as core;
pub use rterm_keys as keys;
pub use rterm_parser as parser;
pub use rterm_screen as screen;
pub use rterm_xfer as xfer;
