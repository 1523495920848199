//! Transmission groups: per-cadence collections of message slots.

use chrono::{DateTime, TimeDelta, Utc};
use slotmap::new_key_type;

use crate::can::CanTime;
use crate::can::frame::CanFrame;
use crate::can::packet::FramePacket;

new_key_type! {
    /// Stable arena key messages use to reference their group.
    pub struct GroupKey;
}

/// One `(message, multiplex value)` slot with its latest clumped payload.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct MsgClump {
    stamp: CanTime,
    message_id: u32,
    message_mux: i64,
    data: u64,
}

/// A set of messages publishing on one shared cadence.
///
/// Slots are registered once at database time; at runtime `add_clumped`
/// overwrites the matching slot and `try_publish` emits the whole group when
/// its window elapses with every slot fresh.
#[derive(Clone, PartialEq, Debug)]
pub struct TxGroup {
    name: String,
    assemble_freq: TimeDelta,
    group_origin: CanTime,
    clumps: Vec<MsgClump>,
}

impl TxGroup {
    pub fn new(name: impl Into<String>, assemble_freq_ms: i64) -> TxGroup {
        TxGroup {
            name: name.into(),
            assemble_freq: TimeDelta::milliseconds(assemble_freq_ms),
            group_origin: DateTime::<Utc>::UNIX_EPOCH,
            clumps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assemble_freq(&self) -> TimeDelta {
        self.assemble_freq
    }

    pub fn group_origin(&self) -> CanTime {
        self.group_origin
    }

    /// Restarts the window at `tp`; called once with the first stamp.
    pub(crate) fn time_begin(&mut self, tp: CanTime) {
        self.group_origin = tp;
    }

    /// Registers the slot for `(message_id, mux)` if not present yet.
    pub(crate) fn assign(&mut self, message_id: u32, message_mux: i64) {
        let exists = self
            .clumps
            .iter()
            .any(|c| c.message_id == message_id && c.message_mux == message_mux);
        if !exists {
            self.clumps.push(MsgClump {
                stamp: DateTime::<Utc>::UNIX_EPOCH,
                message_id,
                message_mux,
                data: 0,
            });
        }
    }

    /// True while `stamp` lies inside the current window.
    pub(crate) fn within_interval(&self, stamp: CanTime) -> bool {
        stamp >= self.group_origin && stamp < self.group_origin + self.assemble_freq
    }

    /// Overwrites the slot matching `(message_id, mux)`.
    pub(crate) fn add_clumped(&mut self, stamp: CanTime, message_id: u32, message_mux: i64, data: u64) {
        if let Some(clump) = self
            .clumps
            .iter_mut()
            .find(|c| c.message_id == message_id && c.message_mux == message_mux)
        {
            clump.stamp = stamp;
            clump.data = data;
        }
    }

    /// Publishes into `packet` if the window ending at `up_to` elapsed with
    /// every slot collected, then slides the window origin to `up_to`
    /// either way.
    pub(crate) fn try_publish(&mut self, up_to: CanTime, packet: &mut FramePacket) {
        if self.group_origin + self.assemble_freq <= up_to {
            if self.all_collected() {
                self.publish(up_to, packet);
            }
            self.group_origin = up_to;
        }
    }

    fn all_collected(&self) -> bool {
        self.clumps.iter().all(|c| {
            let d = c.stamp - self.group_origin;
            d >= TimeDelta::zero() && d < self.assemble_freq
        })
    }

    /// Emits every slot as a synthesized frame, ordered by ascending message
    /// id and, within one id, by descending timestamp. The first frame of
    /// each id run carries the non-muxed signal values and is flagged so.
    fn publish(&mut self, tp: CanTime, packet: &mut FramePacket) {
        self.clumps
            .sort_by(|a, b| a.message_id.cmp(&b.message_id).then(b.stamp.cmp(&a.stamp)));

        let mut prev_id: Option<u32> = None;
        for clump in &self.clumps {
            let mut cf = CanFrame::new(clump.message_id, clump.data.to_le_bytes());
            cf.set_non_muxed_carrier(prev_id != Some(clump.message_id));
            prev_id = Some(clump.message_id);
            packet.append(millis_diff(tp, packet.utc()), &cf);
        }
    }
}

/// Milliseconds between `tp` and a packet's UTC base; negative when `tp`
/// precedes it.
fn millis_diff(tp: CanTime, utc: u32) -> i32 {
    let base = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(i64::from(utc));
    (tp - base).num_milliseconds() as i32
}
