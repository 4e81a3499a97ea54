//! Transfer state enumeration shared by the send and receive machines (§3, §4.3, §4.4).

/// One state of the unified receive/send state machine. Not every state is
/// reachable from every direction (e.g. `YmodemBlock0*` only occur when
/// sending Ymodem), but a single enum keeps the (flavor, direction) lookup
/// tables in `receive`/`send` uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    Init,
    /// Draining buffered input after a bad block, before emitting NAK and
    /// returning to `prior_state`.
    PurgeInput,
    FirstBlock,
    Block,
    LastBlock,
    EotAck,
    YmodemBlock0,
    YmodemBlock0Ack1,
    YmodemBlock0Ack2,
    Complete,
    Abort,
}

impl TransferState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TransferState::Complete | TransferState::Abort)
    }
}
