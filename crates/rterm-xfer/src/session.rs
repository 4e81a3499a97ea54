//! The `Session` entity (§3): everything the receive/send pumps need
//! carried between calls.

use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::flavor::Flavor;
use crate::state::TransferState;
use crate::stats::Statistics;

/// Transfer direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Send,
    Receive,
}

/// One entry in a Ymodem batch file list. A sentinel entry with an empty
/// `name` signals end-of-batch on upload; a block 0 with an empty filename
/// signals the same on download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFileEntry {
    pub name: String,
    pub size: u64,
    pub mtime: u64,
}

impl BatchFileEntry {
    #[must_use]
    pub fn end_of_batch() -> Self {
        BatchFileEntry { name: String::new(), size: 0, mtime: 0 }
    }

    #[must_use]
    pub fn is_end_of_batch(&self) -> bool {
        self.name.is_empty()
    }
}

/// Minimal file access the transfer engine needs. Kept as a trait instead
/// of a concrete `std::fs::File` so tests can drive the state machine
/// against an in-memory buffer without touching the filesystem.
pub trait FileIo {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;
    /// Removes `count` bytes from the end of the file (Xmodem SUB
    /// trimming on receive).
    fn trim_tail(&mut self, count: u64) -> io::Result<()>;
    /// Truncates (or zero-extends) the file to exactly `len` bytes
    /// (Ymodem receive, using the declared size from block 0).
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
    fn set_modified(&mut self, mtime_unix: u64) -> io::Result<()>;
}

/// One transfer in progress: flavor, direction, open file, sequencing and
/// timeout bookkeeping, and (for Ymodem) the batch cursor.
pub struct Session<F: FileIo> {
    pub flavor: Flavor,
    pub direction: Direction,
    pub config: Config,
    pub state: TransferState,
    prior_state: TransferState,
    pub stats: Statistics,

    pub(crate) current_block_sequence_i: u8,
    pub(crate) current_block_number: u64,
    pub(crate) timeout_count: u32,
    pub(crate) error_count: u32,
    pub(crate) first_byte: u8,
    pub(crate) last_good_sequence: Option<u8>,
    pub(crate) block0_seen: bool,
    /// Trailing pad-byte count of the most recently accepted block's
    /// payload, used to trim Xmodem SUB padding once EOT arrives.
    pub(crate) last_block_trailing_pad: u64,
    pub(crate) last_event: Instant,
    /// Number of consecutive `FirstBlock` probe timeouts; five at the base
    /// protocol's 3-second cadence triggers a downgrade to plain Xmodem.
    pub(crate) probe_timeouts: u32,

    pub file: Option<F>,
    pub filename: String,
    pub declared_size: Option<u64>,
    pub declared_mtime: Option<u64>,

    /// Upload batch queue (Ymodem send); consumed front-to-back.
    pub batch: Vec<BatchFileEntry>,
    pub(crate) batch_cursor: usize,

    /// Raw bytes of the most recently transmitted block, kept around so a
    /// NAK can trigger a resend without re-reading the file.
    pub(crate) last_sent_block: Vec<u8>,
    pub(crate) eof_reached: bool,
    /// Set once we've sent 'C' as a sender and are deciding whether the
    /// peer wants CRC or is about to downgrade us to plain checksum.
    pub(crate) sent_crc_probe: bool,
}

impl<F: FileIo> Session<F> {
    #[must_use]
    pub fn new(flavor: Flavor, direction: Direction, config: Config, now: Instant) -> Self {
        let first_byte = match direction {
            Direction::Receive => flavor.first_byte(),
            Direction::Send => 0,
        };
        Session {
            flavor,
            direction,
            config,
            state: TransferState::Init,
            prior_state: TransferState::Init,
            stats: Statistics::default(),
            current_block_sequence_i: flavor.first_data_sequence(),
            current_block_number: 0,
            timeout_count: 0,
            error_count: 0,
            first_byte,
            last_good_sequence: None,
            block0_seen: false,
            last_block_trailing_pad: 0,
            last_event: now,
            probe_timeouts: 0,
            file: None,
            filename: String::new(),
            declared_size: None,
            declared_mtime: None,
            batch: Vec::new(),
            batch_cursor: 0,
            last_sent_block: Vec::new(),
            eof_reached: false,
            sent_crc_probe: false,
        }
    }

    pub(crate) fn enter_purge_input(&mut self) {
        self.prior_state = self.state;
        self.state = TransferState::PurgeInput;
    }

    pub(crate) fn leave_purge_input(&mut self) {
        self.state = self.prior_state;
    }

    pub(crate) fn bump_error(&mut self) -> bool {
        self.stats.record_error();
        self.error_count += 1;
        self.error_count >= self.config.errors_max()
    }

    /// Timeout budget for one wait interval, widened ×10 for the relaxed
    /// flavor.
    #[must_use]
    pub fn timeout_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.config.timeout_max_for(self.flavor.is_relaxed())))
    }

    pub(crate) fn mark_progress(&mut self, now: Instant) {
        self.last_event = now;
        self.timeout_count = 0;
    }

    /// Returns whether a single timeout interval has elapsed since the
    /// last byte was received or sent, and if so records it.
    pub(crate) fn poll_timeout(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_event) >= self.timeout_interval() {
            self.last_event = now;
            self.timeout_count += 1;
            self.stats.record_timeout();
            true
        } else {
            false
        }
    }

    pub fn is_done(&self) -> bool {
        self.state.is_terminal()
    }
}
