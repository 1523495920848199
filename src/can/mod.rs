//! CAN-side leaf components: signal codec, physical scaling, frames, and the
//! frame-packet wire format.

pub mod codec;
pub mod frame;
pub mod packet;

/// Wall-clock time point supplied by the caller; millisecond resolution or
/// finer is assumed throughout.
pub type CanTime = chrono::DateTime<chrono::Utc>;
