//! Errors at the transfer engine's I/O boundary (§7, ambient stack).
//!
//! In-protocol failures (bad CRC, timeout, duplicate block) are never
//! represented here — see [`crate::stats::Statistics`] and the
//! `TransferState::Abort` transition. This type is for the file-system
//! boundary and for caller mistakes.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] rterm_core::Error),

    #[error("no such flavor/direction combination")]
    UnsupportedDirection,

    #[error("batch cursor exhausted: no more files queued")]
    BatchExhausted,
}

pub type Result<T> = std::result::Result<T, Error>;
