use std::io;

/// Errors shared by the file and table I/O boundaries of the `rterm-*`
/// crates.
///
/// This is deliberately narrow: in-protocol failures (bad CRC, timeout,
/// duplicate block, malformed escape sequence) are never represented here,
/// they are surfaced through the statistics/error-counter objects that own
/// them. `Error` is reserved for the I/O boundary and for caller mistakes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed translate-table file: {0}")]
    TranslateTable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
