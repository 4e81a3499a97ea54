#![warn(clippy::pedantic)]

//! Shared scaffolding for the `rterm-*` crates: a common error type and the
//! byte-budget contract that the transfer engine and parser both rely on.

mod error;
mod tracing_init;

pub use error::Error;
pub use tracing_init::init_tracing;

/// Minimum number of free bytes an output buffer must have before it is
/// passed to a transfer-engine pump call: one maximal block (1024 bytes)
/// plus header, sequence, complement and CRC16 bytes.
pub const OUTPUT_BYTE_BUDGET: usize = 1024 + 5;

/// Panics if `buf` does not satisfy [`OUTPUT_BYTE_BUDGET`].
///
/// The transfer engine asserts this at the top of every pump call rather
/// than returning an error: an undersized buffer is a caller bug, not a
/// protocol condition.
#[track_caller]
pub fn assert_output_budget(buf: &[u8]) {
    assert!(
        buf.len() >= OUTPUT_BYTE_BUDGET,
        "output buffer must have at least {OUTPUT_BYTE_BUDGET} free bytes, got {}",
        buf.len()
    );
}
