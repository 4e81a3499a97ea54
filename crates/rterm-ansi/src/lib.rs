#![warn(clippy::pedantic)]

//! Byte-level vocabulary for CSI/ESC/OSC control sequences (§4.6, §6).
//!
//! This crate only builds and names bytes; it has no scan-state machinery
//! of its own (that lives in `rterm-parser`) and no screen model (that
//! lives in `rterm-screen`).

pub mod c0;
pub mod csi;
pub mod mode;
pub mod reply;
pub mod sgr;

pub use c0::*;
