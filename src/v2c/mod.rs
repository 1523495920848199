//! Vehicle-to-cloud transcoder: time-bucketed aggregation of decoded
//! signals into periodically published frame packets.

pub(crate) mod aggregate;
pub mod group;
pub mod message;
pub mod signal;
pub mod transcoder;
pub mod vin;

pub use group::{GroupKey, TxGroup};
pub use message::TrMessage;
pub use signal::{AggKind, TrMuxer, TrSignal};
pub use transcoder::V2cTranscoder;
pub use vin::VinAssembler;
