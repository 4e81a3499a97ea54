//! Transfer statistics (§4.5): blocks, bytes, errors, observable to a UI.

/// Running counters for one transfer session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub blocks_transferred: u64,
    pub bytes_transferred: u64,
    /// Total bytes the transfer is expected to cover. For Ymodem this
    /// comes from the block-0 size field; for Xmodem receive (no
    /// up-front size) it grows with each accepted block.
    pub bytes_total: u64,
    pub error_count: u32,
    pub timeout_count: u32,
}

impl Statistics {
    /// Records one accepted block of `payload_len` bytes (128 or 1024,
    /// inferred by the caller from the block header byte).
    pub fn record_block(&mut self, payload_len: usize, known_total: Option<u64>) {
        self.blocks_transferred += 1;
        self.bytes_transferred += payload_len as u64;

        if let Some(total) = known_total {
            // Ymodem: never let the running total exceed the declared size.
            self.bytes_total = total;
            if self.bytes_transferred > total {
                self.bytes_transferred = total;
            }
        } else {
            // Xmodem receive: grow the projected total alongside transferred
            // bytes since there is no up-front size.
            self.bytes_total = self.bytes_total.max(self.bytes_transferred);
        }
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    pub fn record_timeout(&mut self) {
        self.timeout_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ymodem_total_caps_at_declared_size() {
        let mut stats = Statistics::default();
        stats.record_block(1024, Some(1500));
        stats.record_block(1024, Some(1500));
        assert_eq!(stats.bytes_transferred, 1500);
        assert_eq!(stats.bytes_total, 1500);
    }

    #[test]
    fn xmodem_receive_total_grows_with_transferred_bytes() {
        let mut stats = Statistics::default();
        stats.record_block(128, None);
        stats.record_block(128, None);
        assert_eq!(stats.bytes_transferred, 256);
        assert_eq!(stats.bytes_total, 256);
    }
}
