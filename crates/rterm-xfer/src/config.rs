//! Session-level knobs the base protocol leaves as constants.

/// Tunable limits for a transfer session. The `Default` impl matches the
/// constants the base protocol hard-codes (`errors_max = 15`,
/// `timeout_max = 10`, pad byte `0x1A`, relaxed multiplier ×10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub pad_byte: u8,
    pub errors_max: u32,
    pub timeout_max: u32,
    pub relaxed_multiplier: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pad_byte: 0x1A,
            errors_max: 15,
            timeout_max: 10,
            relaxed_multiplier: 10,
        }
    }
}

impl Config {
    /// Timeout budget for the current flavor: the relaxed flavor gets ten
    /// times the normal allowance.
    #[must_use]
    pub fn timeout_max_for(&self, relaxed: bool) -> u32 {
        if relaxed {
            self.timeout_max * self.relaxed_multiplier
        } else {
            self.timeout_max
        }
    }

    /// Error budget before the session aborts. Unlike the timeout budget,
    /// the relaxed flavor does not widen this one.
    #[must_use]
    pub fn errors_max(&self) -> u32 {
        self.errors_max
    }
}
