//! Binary frame-packet container.
//!
//! A packet aggregates the frames published during one upload window:
//!
//! ```text
//! | version: u16 | utc seconds: u32 |
//! | millis delta: i32 | CAN frame (16 bytes) |
//! | millis delta: i32 | CAN frame (16 bytes) |
//! ...
//! ```
//!
//! All integers little-endian. The millisecond delta is relative to the
//! packet's UTC base and may be negative for stamps before it.

use chrono::{DateTime, TimeDelta, Utc};

use crate::can::frame::CanFrame;
use crate::can::CanTime;

/// Wire format revision carried in every packet header.
pub const PACKET_VERSION: u16 = 100;

const HEADER_LEN: usize = 6;
const RECORD_LEN: usize = 4 + CanFrame::WIRE_SIZE;

/// Growable buffer holding one publish window's frames.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct FramePacket {
    buf: Vec<u8>,
}

impl FramePacket {
    pub fn new() -> FramePacket {
        FramePacket::default()
    }

    /// Resets the buffer and writes a fresh header for the given UTC base.
    pub fn prepare(&mut self, utc: u32) {
        self.buf.clear();
        self.buf.reserve(32 * 1024);
        self.buf.extend_from_slice(&PACKET_VERSION.to_le_bytes());
        self.buf.extend_from_slice(&utc.to_le_bytes());
    }

    /// UTC base seconds from the header; zero for an unprepared packet.
    pub fn utc(&self) -> u32 {
        match self.buf.get(2..HEADER_LEN) {
            Some(b) => u32::from_le_bytes(b.try_into().expect("four utc bytes")),
            None => 0,
        }
    }

    /// True when no record follows the header.
    pub fn is_empty(&self) -> bool {
        self.buf.len() <= HEADER_LEN
    }

    pub fn byte_size(&self) -> usize {
        self.buf.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Appends one `(millis delta, frame)` record.
    pub fn append(&mut self, millis: i32, frame: &CanFrame) {
        self.buf.extend_from_slice(&millis.to_le_bytes());
        self.buf.extend_from_slice(&frame.to_bytes());
    }

    /// Iterates the records, resolving each delta against the UTC base.
    pub fn frames(&self) -> Frames<'_> {
        let rest = self.buf.get(HEADER_LEN..).unwrap_or(&[]);
        Frames { utc: self.utc(), rest }
    }
}

/// Iterator over the `(timestamp, frame)` records of a [`FramePacket`].
#[derive(Debug)]
pub struct Frames<'a> {
    utc: u32,
    rest: &'a [u8],
}

impl Iterator for Frames<'_> {
    type Item = (CanTime, CanFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.len() < RECORD_LEN {
            return None;
        }
        let (record, rest) = self.rest.split_at(RECORD_LEN);
        self.rest = rest;

        let millis = i32::from_le_bytes(record[0..4].try_into().expect("four delta bytes"));
        let frame = CanFrame::from_bytes(record[4..].try_into().expect("sixteen frame bytes"));
        let stamp = DateTime::<Utc>::UNIX_EPOCH
            + TimeDelta::seconds(i64::from(self.utc))
            + TimeDelta::milliseconds(i64::from(millis));
        Some((stamp, frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let mut fp = FramePacket::new();
        fp.prepare(1_700_000_000);

        assert!(fp.is_empty());
        assert_eq!(fp.byte_size(), 6);
        assert_eq!(fp.utc(), 1_700_000_000);
        assert_eq!(fp.as_bytes()[0..2], 100u16.to_le_bytes());
    }

    #[test]
    fn test_append_and_iterate() {
        let mut fp = FramePacket::new();
        fp.prepare(1_700_000_000);

        let frame = CanFrame::new(0x10, [0xAA; 8]);
        fp.append(250, &frame);
        fp.append(-125, &frame);
        assert!(!fp.is_empty());
        assert_eq!(fp.byte_size(), 6 + 2 * 20);

        let base = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(1_700_000_000);
        let records: Vec<_> = fp.frames().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, base + TimeDelta::milliseconds(250));
        assert_eq!(records[0].1, frame);
        assert_eq!(records[1].0, base - TimeDelta::milliseconds(125));
    }

    #[test]
    fn test_unprepared_packet_iterates_nothing() {
        let fp = FramePacket::new();
        assert!(fp.is_empty());
        assert_eq!(fp.frames().count(), 0);
    }
}
