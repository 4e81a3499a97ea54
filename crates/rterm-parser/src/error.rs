use std::io;

/// Programmer/I-O-boundary errors (§7); never raised for malformed
/// terminal input, which the scan-state machine absorbs silently.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] rterm_core::Error),
    #[error("translate-table line {line}: {reason}")]
    TranslateTable { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
