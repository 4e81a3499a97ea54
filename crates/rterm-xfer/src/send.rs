//! Send-side state machine (§4.4).
//!
//! The base protocol's `LAST_BLOCK` state waits for the ACK of the final
//! data block before emitting EOT. Since that ACK is consumed in the same
//! call that discovers end-of-file (reading the *next* chunk returns
//! zero), this implementation folds `LastBlock`'s ACK-wait into that same
//! call instead of deferring it one more round trip; the state still
//! exists and is logged, but is never an external wait point. See
//! `DESIGN.md` for the rationale.

use std::time::Instant;

use crate::block;
use crate::block0;
use crate::error::Result;
use crate::flavor::{BlockSize, Flavor};
use crate::receive::PumpResult;
use crate::session::{FileIo, Session};
use crate::state::TransferState;
use crate::wire;

impl<F: FileIo> Session<F> {
    /// Advances the send state machine by at most one protocol unit.
    /// `out` must satisfy [`rterm_core::assert_output_budget`].
    pub fn send_pump(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        rterm_core::assert_output_budget(out);
        if self.state.is_terminal() {
            return Ok(PumpResult::default());
        }

        match self.state {
            TransferState::Init => self.send_init(input, out, now),
            TransferState::YmodemBlock0 => self.send_block0(out),
            TransferState::YmodemBlock0Ack1 => self.send_block0_ack1(input, out, now),
            TransferState::YmodemBlock0Ack2 => self.send_block0_ack2(input, out),
            TransferState::Block | TransferState::LastBlock => self.send_block(input, out, now),
            TransferState::EotAck => self.send_eot_ack(input, out, now),
            _ => Ok(PumpResult::default()),
        }
    }

    fn send_init(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        if input.is_empty() {
            let _ = self.poll_timeout(now);
            return Ok(PumpResult::default());
        }
        self.mark_progress(now);
        let byte = input[0];
        if byte == wire::CAN {
            tracing::warn!("send: cancelled by peer before start");
            self.state = TransferState::Abort;
            return Ok(PumpResult { consumed: 1, produced: 0 });
        }
        if byte == wire::NAK {
            if matches!(self.flavor, Flavor::XCrc | Flavor::X1K | Flavor::X1KG) {
                tracing::warn!("send: peer NAKed a CRC probe, downgrading to plain Xmodem");
                self.flavor = self.flavor.downgraded();
            }
            self.state = TransferState::Block;
            return Ok(PumpResult { consumed: 1, produced: 0 });
        }
        if byte == b'C' || byte == b'G' {
            self.first_byte = byte;
            self.state = if self.flavor.is_ymodem() {
                TransferState::YmodemBlock0
            } else {
                TransferState::Block
            };
            return Ok(PumpResult { consumed: 1, produced: 0 });
        }
        tracing::debug!(byte, "send: ignoring unrecognized byte while waiting to start");
        Ok(PumpResult { consumed: 1, produced: 0 })
    }

    fn current_batch_entry(&self) -> crate::session::BatchFileEntry {
        self.batch
            .get(self.batch_cursor)
            .cloned()
            .unwrap_or_else(crate::session::BatchFileEntry::end_of_batch)
    }

    fn send_block0(&mut self, out: &mut [u8]) -> Result<PumpResult> {
        let entry = self.current_batch_entry();
        let mut payload = [0u8; 1024];
        block0::encode_block0(&mut payload[..128], &entry);
        let n = block::construct_block(out, self.flavor, 0, &payload[..128], self.config.pad_byte);
        self.last_sent_block = out[..n].to_vec();
        tracing::debug!(name = %entry.name, "send: emitting ymodem block 0");
        self.state = TransferState::YmodemBlock0Ack1;
        Ok(PumpResult { consumed: 0, produced: n })
    }

    fn send_block0_ack1(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        if input.is_empty() {
            if self.poll_timeout(now) {
                let n = self.last_sent_block.len();
                out[..n].copy_from_slice(&self.last_sent_block);
                return Ok(PumpResult { consumed: 0, produced: n });
            }
            return Ok(PumpResult::default());
        }
        self.mark_progress(now);
        match input[0] {
            wire::NAK => {
                let n = self.last_sent_block.len();
                out[..n].copy_from_slice(&self.last_sent_block);
                Ok(PumpResult { consumed: 1, produced: n })
            }
            wire::ACK => {
                let next = input.get(1).copied();
                let completing = self.current_batch_entry().is_end_of_batch();
                if next == Some(b'C') || next == Some(b'G') {
                    self.state = if completing { TransferState::Complete } else { TransferState::Block };
                    Ok(PumpResult { consumed: 2, produced: 0 })
                } else if completing {
                    self.state = TransferState::Complete;
                    Ok(PumpResult { consumed: 1, produced: 0 })
                } else {
                    self.state = TransferState::YmodemBlock0Ack2;
                    Ok(PumpResult { consumed: 1, produced: 0 })
                }
            }
            _ => Ok(PumpResult { consumed: 1, produced: 0 }),
        }
    }

    fn send_block0_ack2(&mut self, input: &[u8], _out: &mut [u8]) -> Result<PumpResult> {
        if input.is_empty() {
            return Ok(PumpResult::default());
        }
        if input[0] == b'C' || input[0] == b'G' {
            self.state = TransferState::Block;
            return Ok(PumpResult { consumed: 1, produced: 0 });
        }
        Ok(PumpResult { consumed: 1, produced: 0 })
    }

    fn send_block(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        let needs_ack = !self.flavor.is_streaming() && self.current_block_number > 0;
        if needs_ack {
            if input.is_empty() {
                if self.poll_timeout(now) {
                    let n = self.last_sent_block.len();
                    out[..n].copy_from_slice(&self.last_sent_block);
                    return Ok(PumpResult { consumed: 0, produced: n });
                }
                return Ok(PumpResult::default());
            }
            self.mark_progress(now);
            match input[0] {
                wire::CAN => {
                    tracing::warn!("send: cancelled by peer mid-transfer");
                    self.state = TransferState::Abort;
                    return Ok(PumpResult { consumed: 1, produced: 0 });
                }
                wire::NAK => {
                    self.bump_error();
                    let n = self.last_sent_block.len();
                    out[..n].copy_from_slice(&self.last_sent_block);
                    return Ok(PumpResult { consumed: 1, produced: n });
                }
                wire::ACK => {
                    // fall through to send the next chunk below
                }
                _ => return Ok(PumpResult { consumed: 1, produced: 0 }),
            }
            return self.send_next_chunk(out, 1);
        }
        self.send_next_chunk(out, 0)
    }

    fn send_next_chunk(&mut self, out: &mut [u8], consumed: usize) -> Result<PumpResult> {
        let max_len = match self.flavor.block_size() {
            BlockSize::Fixed128 => 128,
            BlockSize::Variable1024 => 1024,
        };
        let mut chunk = [0u8; 1024];
        let n = self
            .file
            .as_mut()
            .map_or(Ok(0), |f| f.read_chunk(&mut chunk[..max_len]))
            .map_err(rterm_core::Error::from)?;

        if n == 0 {
            tracing::debug!("send: end of file reached (conceptually LastBlock), emitting EOT");
            out[0] = wire::EOT;
            self.state = TransferState::EotAck;
            return Ok(PumpResult { consumed, produced: 1 });
        }

        let sequence = self.current_block_sequence_i;
        let block_len = block::construct_block(out, self.flavor, sequence, &chunk[..n], self.config.pad_byte);
        self.last_sent_block = out[..block_len].to_vec();
        self.current_block_sequence_i = sequence.wrapping_add(1);
        self.current_block_number += 1;
        self.stats.record_block(n, None);
        tracing::debug!(sequence, n, "send: emitted block");
        Ok(PumpResult { consumed, produced: block_len })
    }

    fn send_eot_ack(&mut self, input: &[u8], out: &mut [u8], now: Instant) -> Result<PumpResult> {
        if input.is_empty() {
            if self.poll_timeout(now) {
                tracing::debug!("send: re-emitting EOT after timeout");
                out[0] = wire::EOT;
                return Ok(PumpResult { consumed: 0, produced: 1 });
            }
            return Ok(PumpResult::default());
        }
        self.mark_progress(now);
        if input[0] != wire::ACK {
            return Ok(PumpResult { consumed: 1, produced: 0 });
        }
        if self.flavor.is_ymodem() {
            self.batch_cursor += 1;
            self.current_block_number = 0;
            self.current_block_sequence_i = self.flavor.first_data_sequence();
            self.block0_seen = false;
            self.state = TransferState::Init;
            tracing::debug!(cursor = self.batch_cursor, "send: advanced ymodem batch cursor");
        } else {
            self.state = TransferState::Complete;
            tracing::debug!("send: xmodem transfer complete");
        }
        Ok(PumpResult { consumed: 1, produced: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::crc::checksum8;
    use crate::session::Direction;

    struct SliceFile<'a> {
        remaining: &'a [u8],
    }

    impl FileIo for SliceFile<'_> {
        fn read_chunk(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.remaining.len());
            buf[..n].copy_from_slice(&self.remaining[..n]);
            self.remaining = &self.remaining[n..];
            Ok(n)
        }
        fn write_all(&mut self, _data: &[u8]) -> std::io::Result<()> {
            unreachable!("send side never writes")
        }
        fn trim_tail(&mut self, _count: u64) -> std::io::Result<()> {
            unreachable!()
        }
        fn truncate_to(&mut self, _len: u64) -> std::io::Result<()> {
            unreachable!()
        }
        fn set_modified(&mut self, _mtime_unix: u64) -> std::io::Result<()> {
            unreachable!()
        }
    }

    /// The base specification's literal scenario 1: a 300-byte file of
    /// 'A' bytes, X_NORMAL upload.
    #[test]
    fn x_normal_upload_of_300_a_bytes_matches_literal_scenario() {
        let now = Instant::now();
        let data = [b'A'; 300];
        let mut s = Session::new(Flavor::XNormal, Direction::Send, Config::default(), now);
        s.file = Some(SliceFile { remaining: &data });

        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];

        // Receiver's initial NAK starts the transfer.
        let r = s.send_pump(&[wire::NAK], &mut out, now).unwrap();
        assert_eq!(r.consumed, 1);
        assert_eq!(s.state, TransferState::Block);

        // First block: 128 'A's.
        let r = s.send_pump(&[], &mut out, now).unwrap();
        assert_eq!(&out[..3], &[wire::SOH, 0x01, 0xFE]);
        assert_eq!(&out[3..3 + 128], &[b'A'; 128][..]);
        assert_eq!(out[3 + 128], checksum8(&[b'A'; 128]));
        assert_eq!(out[3 + 128], 0x80);
        assert_eq!(r.produced, 3 + 128 + 1);

        // Second block: another 128 'A's, sum wraps to 0x00.
        let r = s.send_pump(&[wire::ACK], &mut out, now).unwrap();
        assert_eq!(&out[..3], &[wire::SOH, 0x02, 0xFD]);
        assert_eq!(out[3 + 128], 0x00);
        assert_eq!(r.produced, 3 + 128 + 1);

        // Third block: remaining 44 'A's padded with 84 SUB bytes.
        let r = s.send_pump(&[wire::ACK], &mut out, now).unwrap();
        assert_eq!(&out[..3], &[wire::SOH, 0x03, 0xFC]);
        assert_eq!(&out[3..3 + 44], &[b'A'; 44][..]);
        assert!(out[3 + 44..3 + 128].iter().all(|&b| b == 0x1A));
        assert_eq!(r.produced, 3 + 128 + 1);

        // Fourth round: EOF reached, EOT emitted.
        let r = s.send_pump(&[wire::ACK], &mut out, now).unwrap();
        assert_eq!(out[0], wire::EOT);
        assert_eq!(r.produced, 1);
        assert_eq!(s.state, TransferState::EotAck);

        // Final ACK completes the session.
        let r = s.send_pump(&[wire::ACK], &mut out, now).unwrap();
        assert_eq!(r.produced, 0);
        assert_eq!(s.state, TransferState::Complete);
    }

    #[test]
    fn nak_during_block_resends_identical_bytes() {
        let now = Instant::now();
        let data = [b'B'; 50];
        let mut s = Session::new(Flavor::XNormal, Direction::Send, Config::default(), now);
        s.file = Some(SliceFile { remaining: &data });
        let mut out = [0u8; rterm_core::OUTPUT_BYTE_BUDGET];

        s.send_pump(&[wire::NAK], &mut out, now).unwrap();
        s.send_pump(&[], &mut out, now).unwrap();
        let first = out;

        let r = s.send_pump(&[wire::NAK], &mut out, now).unwrap();
        assert_eq!(out, first);
        assert_eq!(r.produced, 3 + 128 + 1);
    }
}
