/// Programmer/I-O-boundary errors (§7); malformed terminal input never
/// reaches this type; the scan-state machine absorbs it upstream.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] rterm_core::Error),
    #[error("screen dimensions must be nonzero, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
