//! Per-message assembly state.

use chrono::{DateTime, Utc};
use slotmap::SlotMap;

use crate::can::CanTime;
use crate::can::frame::CanFrame;
use crate::v2c::aggregate::SigAsm;
use crate::v2c::group::{GroupKey, TxGroup};
use crate::v2c::signal::{AggKind, TrMuxer, TrSignal};

/// A message as the transcoder sees it: its signals, the optional
/// multiplexer switch, one reducer per aggregating signal, and a key into
/// the owning transmission group.
#[derive(Default, Clone, Debug)]
pub struct TrMessage {
    signals: Vec<TrSignal>,
    mux: Option<TrMuxer>,
    sig_asms: Vec<SigAsm>,
    tx_group: Option<GroupKey>,
    last_stamp: Option<CanTime>,
}

impl TrMessage {
    pub(crate) fn add_signal(&mut self, sig: TrSignal) {
        self.signals.push(sig);
    }

    pub(crate) fn add_muxer(&mut self, mux: TrMuxer) {
        self.mux = Some(mux);
    }

    pub(crate) fn sig_agg_type(&mut self, sig_name: &str, agg: AggKind) {
        if let Some(sig) = self.find_signal(sig_name) {
            sig.set_agg(agg);
        }
    }

    pub(crate) fn sig_val_type(&mut self, sig_name: &str, tag: u32) {
        if let Some(sig) = self.find_signal(sig_name) {
            sig.set_val_type(tag);
        }
    }

    fn find_signal(&mut self, sig_name: &str) -> Option<&mut TrSignal> {
        self.signals.iter_mut().find(|s| s.name() == sig_name)
    }

    /// Binds this message to a group: builds the reducers and registers one
    /// slot per distinct multiplex value (or a single `-1` slot).
    pub(crate) fn assign_group(
        &mut self,
        key: GroupKey,
        message_id: u32,
        groups: &mut SlotMap<GroupKey, TxGroup>,
    ) {
        self.tx_group = Some(key);
        self.sig_asms = self.signals.iter().filter_map(SigAsm::for_signal).collect();

        let Some(group) = groups.get_mut(key) else {
            return;
        };
        if self.mux.is_some() {
            for mux_val in self.distinct_mux_vals() {
                group.assign(message_id, mux_val);
            }
        } else {
            group.assign(message_id, -1);
        }
    }

    fn distinct_mux_vals(&self) -> Vec<i64> {
        let mut vals: Vec<i64> = self.signals.iter().filter_map(|s| s.mux_val()).collect();
        vals.sort_unstable();
        vals.dedup();
        vals
    }

    /// Folds one frame into the window state and hands the clumped payload
    /// to the owning group. Reducers restart whenever the previous frame
    /// fell outside the group's current window.
    pub(crate) fn assemble(
        &mut self,
        stamp: CanTime,
        frame: &CanFrame,
        groups: &mut SlotMap<GroupKey, TxGroup>,
    ) {
        let Some(group) = self.tx_group.and_then(|k| groups.get_mut(k)) else {
            return;
        };

        let last = self.last_stamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        if !group.within_interval(last) {
            for asm in &mut self.sig_asms {
                asm.reset();
            }
        }

        let data = frame.data_u64();
        let mux_val = self.mux.as_ref().map_or(-1, |m| m.decode(data) as i64);

        let mut clumped = 0u64;
        for asm in &mut self.sig_asms {
            clumped |= asm.assemble(mux_val, data);
        }
        if let Some(mux) = &self.mux {
            clumped |= mux.encode(mux.decode(data));
        }

        group.add_clumped(stamp, frame.can_id, mux_val, clumped);
        self.last_stamp = Some(stamp);
    }

    /// Iterates the signals active for the given payload word, resolving the
    /// multiplexer first.
    pub fn signals(&self, data: u64) -> impl Iterator<Item = &TrSignal> {
        let frame_mux = self.mux.as_ref().map_or(-1, |m| m.decode(data) as i64);
        self.signals.iter().filter(move |s| s.is_active(frame_mux))
    }

    pub fn muxer(&self) -> Option<&TrMuxer> {
        self.mux.as_ref()
    }
}
