#![warn(clippy::pedantic)]

//! Keyboard encoder (§4.8): logical key + active modes -> host byte sequence.

pub mod encode;
pub mod key;
pub mod modes;

pub use encode::{encode, Encoded, FunctionKeyConvention};
pub use key::{Key, KeypadKey};
pub use modes::{ArrowKeyMode, BackspaceMode, EncoderModes, KeypadMode};
