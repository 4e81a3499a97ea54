//! Receive-side state machine (§4.3).

use std::time::Instant;

use crate::block::{self, BlockError};
use crate::block0;
use crate::error::Result;
use crate::flavor::Framing;
use crate::session::{FileIo, Session};
use crate::state::TransferState;
use crate::wire;

/// Outcome of one `receive_pump` call: how many input bytes were consumed
/// and how many output bytes were written to the caller's buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpResult {
    pub consumed: usize,
    pub produced: usize,
}

fn trailing_pad_count(payload: &[u8], pad_byte: u8) -> u64 {
    payload.iter().rev().take_while(|&&b| b == pad_byte).count() as u64
}

impl<F: FileIo> Session<F> {
    /// Advances the receive state machine by at most one protocol unit
    /// (a control byte or a full block), per the design notes' inner-loop
    /// model. Call repeatedly with any leftover `input` (after `consumed`
    /// bytes are dropped) until `consumed == 0 && produced == 0` or the
    /// session [`Session::is_done`].
    ///
    /// `out` must satisfy [`rterm_core::assert_output_budget`].
    pub fn receive_pump(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        rterm_core::assert_output_budget(out);
        if self.state.is_terminal() {
            return Ok(PumpResult::default());
        }

        match self.state {
            TransferState::Init => {
                out[0] = self.first_byte;
                self.mark_progress(now);
                self.state = if matches!(
                    self.flavor,
                    crate::flavor::Flavor::XNormal | crate::flavor::Flavor::XRelaxed
                ) {
                    TransferState::Block
                } else {
                    TransferState::FirstBlock
                };
                tracing::debug!(flavor = ?self.flavor, first_byte = self.first_byte, "receive: sent start probe");
                Ok(PumpResult { consumed: 0, produced: 1 })
            }

            TransferState::FirstBlock => {
                if !input.is_empty() {
                    self.mark_progress(now);
                    self.state = TransferState::Block;
                    return Ok(PumpResult::default());
                }
                if self.poll_timeout(now) {
                    self.probe_timeouts += 1;
                    if self.probe_timeouts >= 5 {
                        tracing::warn!("receive: downgrading to plain Xmodem after repeated probe timeouts");
                        self.flavor = self.flavor.downgraded();
                        self.first_byte = wire::NAK;
                        self.probe_timeouts = 0;
                        self.state = TransferState::Block;
                        out[0] = wire::NAK;
                    } else {
                        out[0] = self.first_byte;
                    }
                    return Ok(PumpResult { consumed: 0, produced: 1 });
                }
                Ok(PumpResult::default())
            }

            TransferState::PurgeInput => {
                if !input.is_empty() {
                    return Ok(PumpResult { consumed: input.len(), produced: 0 });
                }
                out[0] = wire::NAK;
                self.leave_purge_input();
                Ok(PumpResult { consumed: 0, produced: 1 })
            }

            TransferState::Block => self.receive_block(input, out, now),

            _ => Ok(PumpResult::default()),
        }
    }

    fn receive_block(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        if input.is_empty() {
            if self.poll_timeout(now) {
                let budget = self.config.timeout_max_for(self.flavor.is_relaxed());
                if self.timeout_count >= budget {
                    tracing::error!(timeouts = self.timeout_count, "receive: too many timeouts, aborting");
                    out[0] = wire::CAN;
                    self.state = TransferState::Abort;
                    return Ok(PumpResult { consumed: 0, produced: 1 });
                }
                out[0] = self.first_byte;
                return Ok(PumpResult { consumed: 0, produced: 1 });
            }
            return Ok(PumpResult::default());
        }

        if input[0] == wire::EOT {
            self.mark_progress(now);
            return self.handle_eot(out);
        }

        let header = input[0];
        let payload_len = match header {
            wire::SOH => 128,
            wire::STX => 1024,
            _ => {
                tracing::warn!(byte = header, "receive: unexpected byte outside a block, dropping");
                self.enter_purge_input();
                return Ok(PumpResult { consumed: 1, produced: 0 });
            }
        };
        let overhead = match self.flavor.framing() {
            Framing::Checksum => 1,
            Framing::Crc16 => 2,
        };
        let total = 3 + payload_len + overhead;
        if input.len() < total {
            return Ok(PumpResult::default());
        }

        self.mark_progress(now);
        let buf = &input[..total];

        if self.flavor.is_ymodem() && !self.block0_seen {
            return self.receive_block0(buf, total, out);
        }

        match block::verify_block(buf, self.flavor, self.current_block_sequence_i, self.last_good_sequence) {
            Ok(verified) => {
                let pad = trailing_pad_count(verified.payload, self.config.pad_byte);
                if let Some(file) = self.file.as_mut() {
                    file.write_all(verified.payload).map_err(rterm_core::Error::from)?;
                }
                self.last_block_trailing_pad = pad;
                self.last_good_sequence = Some(verified.sequence);
                self.current_block_sequence_i = verified.sequence.wrapping_add(1);
                self.current_block_number += 1;
                self.stats.record_block(verified.payload.len(), self.declared_size);
                tracing::debug!(sequence = verified.sequence, "receive: accepted block");

                if self.flavor.is_streaming() {
                    Ok(PumpResult { consumed: total, produced: 0 })
                } else {
                    out[0] = wire::ACK;
                    Ok(PumpResult { consumed: total, produced: 1 })
                }
            }
            Err(BlockError::Duplicate) => {
                tracing::debug!("receive: duplicate block, ack without rewriting");
                out[0] = wire::ACK;
                Ok(PumpResult { consumed: total, produced: 1 })
            }
            Err(err) => {
                tracing::warn!(%err, "receive: block rejected");
                if self.flavor.is_streaming() {
                    out[0] = wire::CAN;
                    self.state = TransferState::Abort;
                    return Ok(PumpResult { consumed: total, produced: 1 });
                }
                let aborted = self.bump_error();
                if aborted {
                    out[0] = wire::CAN;
                    self.state = TransferState::Abort;
                    return Ok(PumpResult { consumed: total, produced: 1 });
                }
                self.enter_purge_input();
                Ok(PumpResult { consumed: total, produced: 0 })
            }
        }
    }

    fn receive_block0(&mut self, buf: &[u8], total: usize, out: &mut [u8]) -> Result<PumpResult> {
        match block::verify_block(buf, self.flavor, 0, None) {
            Ok(verified) => {
                let entry = block0::decode_block0(verified.payload);
                if entry.is_end_of_batch() {
                    tracing::debug!("receive: ymodem batch terminator");
                    out[0] = wire::ACK;
                    self.state = TransferState::Complete;
                    return Ok(PumpResult { consumed: total, produced: 1 });
                }
                tracing::debug!(name = %entry.name, size = entry.size, "receive: ymodem block 0");
                self.filename = entry.name;
                self.declared_size = Some(entry.size);
                self.declared_mtime = Some(entry.mtime);
                self.block0_seen = true;
                self.current_block_sequence_i = self.flavor.first_data_sequence();
                self.last_good_sequence = Some(0);
                out[0] = wire::ACK;
                out[1] = self.first_byte;
                Ok(PumpResult { consumed: total, produced: 2 })
            }
            Err(err) => {
                tracing::warn!(%err, "receive: block 0 rejected");
                let aborted = self.bump_error();
                if aborted {
                    out[0] = wire::CAN;
                    self.state = TransferState::Abort;
                    return Ok(PumpResult { consumed: total, produced: 1 });
                }
                self.enter_purge_input();
                Ok(PumpResult { consumed: total, produced: 0 })
            }
        }
    }

    fn handle_eot(&mut self, out: &mut [u8]) -> Result<PumpResult> {
        if let Some(file) = self.file.as_mut() {
            if self.flavor.is_ymodem() {
                let size = self.declared_size.unwrap_or(0);
                file.truncate_to(size).map_err(rterm_core::Error::from)?;
                if let Some(mtime) = self.declared_mtime {
                    file.set_modified(mtime).map_err(rterm_core::Error::from)?;
                }
            } else if self.last_block_trailing_pad > 0 {
                file.trim_tail(self.last_block_trailing_pad).map_err(rterm_core::Error::from)?;
            }
        }

        if self.flavor.is_ymodem() {
            tracing::debug!("receive: ymodem file complete, awaiting next batch entry");
            out[0] = wire::ACK;
            out[1] = self.first_byte;
            self.block0_seen = false;
            self.state = TransferState::Block;
            Ok(PumpResult { consumed: 1, produced: 2 })
        } else {
            tracing::debug!("receive: xmodem transfer complete");
            out[0] = wire::ACK;
            self.state = TransferState::Complete;
            Ok(PumpResult { consumed: 1, produced: 1 })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::flavor::Flavor;
    use crate::session::Direction;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct MemFile {
        data: Rc<RefCell<Vec<u8>>>,
    }

    impl FileIo for MemFile {
        fn read_chunk(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
        fn write_all(&mut self, data: &[u8]) -> std::io::Result<()> {
            self.data.borrow_mut().extend_from_slice(data);
            Ok(())
        }
        fn trim_tail(&mut self, count: u64) -> std::io::Result<()> {
            let mut d = self.data.borrow_mut();
            let new_len = d.len().saturating_sub(count as usize);
            d.truncate(new_len);
            Ok(())
        }
        fn truncate_to(&mut self, len: u64) -> std::io::Result<()> {
            self.data.borrow_mut().resize(len as usize, 0);
            Ok(())
        }
        fn set_modified(&mut self, _mtime_unix: u64) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn new_session(flavor: Flavor, now: Instant) -> Session<MemFile> {
        let mut s = Session::new(flavor, Direction::Receive, Config::default(), now);
        s.file = Some(MemFile::default());
        s
    }

    #[test]
    fn init_emits_flavor_specific_first_byte() {
        let now = Instant::now();
        let mut s = new_session(Flavor::XCrc, now);
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let r = s.receive_pump(&[], &mut out, now).unwrap();
        assert_eq!(r.produced, 1);
        assert_eq!(out[0], b'C');
        assert_eq!(s.state, TransferState::FirstBlock);
    }

    #[test]
    fn xnormal_receives_block_and_acks() {
        let now = Instant::now();
        let mut s = new_session(Flavor::XNormal, now);
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        s.receive_pump(&[], &mut out, now).unwrap();
        assert_eq!(s.state, TransferState::Block);

        let mut block = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let n = block::construct_block(&mut block, Flavor::XNormal, 1, b"hello", 0x1A);
        let r = s.receive_pump(&block[..n], &mut out, now).unwrap();
        assert_eq!(r.consumed, n);
        assert_eq!(r.produced, 1);
        assert_eq!(out[0], wire::ACK);
        assert_eq!(s.current_block_sequence_i, 2);

        let r2 = s.receive_pump(&[wire::EOT], &mut out, now).unwrap();
        assert_eq!(r2.produced, 1);
        assert_eq!(out[0], wire::ACK);
        assert_eq!(s.state, TransferState::Complete);
    }

    #[test]
    fn duplicate_block_acks_without_duplicating_file_contents() {
        let now = Instant::now();
        let mut s = new_session(Flavor::XNormal, now);
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        s.receive_pump(&[], &mut out, now).unwrap();

        let mut block = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let n = block::construct_block(&mut block, Flavor::XNormal, 1, b"hi", 0x1A);
        s.receive_pump(&block[..n], &mut out, now).unwrap();
        let file_len_after_first = s.file.as_ref().unwrap().data.borrow().len();

        // Simulate the ACK getting lost: sender resends the same block.
        let r = s.receive_pump(&block[..n], &mut out, now).unwrap();
        assert_eq!(out[0], wire::ACK);
        assert_eq!(r.consumed, n);
        assert_eq!(s.file.as_ref().unwrap().data.borrow().len(), file_len_after_first);
    }

    #[test]
    fn ymodem_batch_terminator_completes_session() {
        let now = Instant::now();
        let mut s = new_session(Flavor::YNormal, now);
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        s.receive_pump(&[], &mut out, now).unwrap();
        assert_eq!(s.state, TransferState::FirstBlock);

        let mut block0 = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];
        let mut payload = [0u8; 128];
        block0::encode_block0(&mut payload, &crate::session::BatchFileEntry::end_of_batch());
        let n = block::construct_block(&mut block0, Flavor::YNormal, 0, &payload, 0);
        let r = s.receive_pump(&block0[..n], &mut out, now).unwrap();
        assert_eq!(out[0], wire::ACK);
        assert_eq!(r.produced, 1);
        assert_eq!(s.state, TransferState::Complete);
    }
}
