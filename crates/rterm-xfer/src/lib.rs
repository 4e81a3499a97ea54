#![warn(clippy::pedantic)]

//! The Xmodem/Ymodem transfer engine: seven flavors, send and receive, as
//! a single cooperative state machine driven by byte slices (§5).

pub mod block;
pub mod block0;
pub mod config;
pub mod crc;
pub mod error;
pub mod flavor;
pub mod receive;
pub mod send;
pub mod session;
pub mod state;
pub mod stats;
pub mod wire;

pub use config::Config;
pub use error::{Error, Result};
pub use flavor::Flavor;
pub use receive::PumpResult;
pub use session::{BatchFileEntry, Direction, FileIo, Session};
pub use state::TransferState;
pub use stats::Statistics;
