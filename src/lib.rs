//! # can_v2c
//!
//! Rust engine for turning raw **CAN bus** traffic into compact upload
//! packets, driven by a Vector **DBC** database.
//!
//! ## Highlights
//! - **DBC parser**: strict section-ordered parser feeding a typed
//!   [`DbcInterpreter`](crate::dbc::DbcInterpreter) event sink; consumers
//!   opt into the events they need.
//! - **Signal codec**: bit-exact extraction/insertion for Intel and
//!   Motorola layouts, including nine-byte straddles, with typed value
//!   domains and linear physical scaling.
//! - **Transcoder**: windowed LAST/AVG aggregation per message, multiplexed
//!   payload handling, transmission groups publishing on their own cadence,
//!   and VIN reassembly.
//! - **Frame packets**: the binary container collecting every published
//!   frame of one upload window, iterable for inspection.
//!
//! The runtime core is single-threaded and clockless: callers supply every
//! timestamp, so the engine is deterministic and testable under a synthetic
//! clock.
//!
//! ```no_run
//! use can_v2c::{CanFrame, V2cTranscoder, parse_dbc, read_dbc_file};
//! use chrono::Utc;
//!
//! let mut transcoder = V2cTranscoder::new();
//! let src = read_dbc_file("vehicle.dbc")?;
//! parse_dbc(&src, &mut transcoder)?;
//!
//! let frame = CanFrame::new(0x100, [0; 8]);
//! if let Some(packet) = transcoder.transcode(Utc::now(), &frame) {
//!     upload(packet.as_bytes());
//! }
//! # fn upload(_: &[u8]) {}
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod can;
pub mod dbc;
pub mod v2c;

pub use crate::can::CanTime;
pub use crate::can::codec::{Endianness, PhysValue, SigCodec, SigValue, Signess, ValType};
pub use crate::can::frame::{CAN_MAX_DLEN, CanFrame};
pub use crate::can::packet::{FramePacket, PACKET_VERSION};
pub use crate::dbc::{DbcFileError, DbcInterpreter, ParseError, parse_dbc, read_dbc_file};
pub use crate::v2c::V2cTranscoder;
