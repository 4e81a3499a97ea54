//! The seven Xmodem/Ymodem dialects and the properties that distinguish them.

/// Checksum framing used by a [`Flavor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// 8-bit sum of the payload bytes, modulo 256.
    Checksum,
    /// CRC-16/XMODEM (polynomial 0x1021, init 0, no final XOR) big-endian.
    Crc16,
}

/// Block payload size a [`Flavor`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSize {
    /// Always 128 bytes.
    Fixed128,
    /// 1024 bytes, except the final block may shrink to 128 when that's
    /// enough to hold the remaining (unpadded) data.
    Variable1024,
}

/// One of the seven transfer dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    XNormal,
    XRelaxed,
    XCrc,
    X1K,
    X1KG,
    YNormal,
    YG,
}

impl Flavor {
    pub const fn framing(self) -> Framing {
        match self {
            Flavor::XNormal | Flavor::XRelaxed => Framing::Checksum,
            Flavor::XCrc | Flavor::X1K | Flavor::X1KG | Flavor::YNormal | Flavor::YG => {
                Framing::Crc16
            }
        }
    }

    pub const fn block_size(self) -> BlockSize {
        match self {
            Flavor::XNormal | Flavor::XRelaxed | Flavor::XCrc => BlockSize::Fixed128,
            Flavor::X1K | Flavor::X1KG | Flavor::YNormal | Flavor::YG => BlockSize::Variable1024,
        }
    }

    /// Streaming ("-G") flavors send without waiting for a per-block ACK;
    /// any verification failure on either side is fatal.
    pub const fn is_streaming(self) -> bool {
        matches!(self, Flavor::X1KG | Flavor::YG)
    }

    /// Ymodem flavors carry a block-0 batch metadata header.
    pub const fn is_ymodem(self) -> bool {
        matches!(self, Flavor::YNormal | Flavor::YG)
    }

    /// Relaxed Xmodem multiplies the timeout/error budgets by ten.
    pub const fn is_relaxed(self) -> bool {
        matches!(self, Flavor::XRelaxed)
    }

    /// The byte a receiver emits to start (or restart) a transfer.
    pub const fn first_byte(self) -> u8 {
        match self {
            Flavor::XNormal | Flavor::XRelaxed => super::wire::NAK,
            Flavor::XCrc | Flavor::X1K | Flavor::YNormal => b'C',
            Flavor::X1KG | Flavor::YG => b'G',
        }
    }

    /// Sequence byte the first transferred data block uses. Ymodem's block
    /// 0 (batch metadata) consumes sequence 0, so the first file-data block
    /// is sequence 1 for every flavor.
    pub const fn first_data_sequence(self) -> u8 {
        1
    }

    /// The flavor a receiver downgrades to after exhausting CRC/'C' probes
    /// without a reply (always plain checksum Xmodem, per the base spec).
    pub const fn downgraded(self) -> Flavor {
        Flavor::XNormal
    }
}
