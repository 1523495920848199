//! The transcoder orchestrator.
//!
//! Construction happens through parser events: `BO_`/`SG_` build the message
//! map, `EV_` variables set the cadences, `BA_` attributes bind messages to
//! transmission groups and pick aggregation policies. At runtime,
//! [`V2cTranscoder::transcode`] is the sole mutator: it ticks group windows,
//! rotates the output packet, and routes each frame to its message.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use slotmap::SlotMap;

use crate::can::CanTime;
use crate::can::codec::{PhysValue, SigCodec};
use crate::can::frame::CanFrame;
use crate::can::packet::FramePacket;
use crate::dbc::interpreter::{AttrValue, BaTarget, DbcInterpreter, EnvVarDef, MuxerDef, SignalDef};
use crate::v2c::group::{GroupKey, TxGroup};
use crate::v2c::message::TrMessage;
use crate::v2c::signal::{AggKind, TrMuxer, TrSignal};
use crate::v2c::vin::VinAssembler;

/// Environment variable fixing the packet publish period.
const TX_TIME_VAR: &str = "V2CTxTime";
/// Suffix marking the environment variables that declare transmission groups.
const GROUP_FREQ_SUFFIX: &str = "GroupTxFreq";
/// Attribute selecting a signal's aggregation policy.
const AGG_TYPE_ATTR: &str = "AggType";
/// Attribute binding a message to a transmission group.
const TX_GROUP_ATTR: &str = "TxGroupFreq";
/// Message whose signals carry the vehicle identification number.
const VIN_MESSAGE: &str = "VIN";

/// Single-threaded CAN-to-packet transcoder.
///
/// Feed it `(stamp, frame)` pairs; time is whatever the caller supplies, so
/// the whole engine runs under a synthetic clock in tests. Stamps should be
/// non-decreasing: a stamp earlier than the current packet's base rotates
/// the packet out and seeds a new one at the earlier time, which is defined
/// but not recommended.
#[derive(Debug)]
pub struct V2cTranscoder {
    publish_freq: TimeDelta,
    /// Gcd of all group periods; zero until a group is declared.
    update_freq: TimeDelta,
    msgs: HashMap<u32, TrMessage>,
    tx_groups: SlotMap<GroupKey, TxGroup>,
    vin: VinAssembler,
    frame_packet: FramePacket,
    last_update_tp: Option<CanTime>,
}

impl Default for V2cTranscoder {
    fn default() -> V2cTranscoder {
        V2cTranscoder {
            publish_freq: TimeDelta::zero(),
            update_freq: TimeDelta::zero(),
            msgs: HashMap::new(),
            tx_groups: SlotMap::with_key(),
            vin: VinAssembler::default(),
            frame_packet: FramePacket::new(),
            last_update_tp: None,
        }
    }
}

impl V2cTranscoder {
    pub fn new() -> V2cTranscoder {
        V2cTranscoder::default()
    }

    /// Ingests one timestamped frame.
    ///
    /// Returns the previous frame packet when `stamp` crossed the publish
    /// window boundary and that packet had content; `None` otherwise.
    pub fn transcode(&mut self, stamp: CanTime, frame: &CanFrame) -> Option<FramePacket> {
        self.setup_timers(stamp);

        if !self.update_freq.is_zero() {
            let mut last = self.last_update_tp.unwrap_or(stamp);
            while last + self.update_freq <= stamp {
                let tick = last + self.update_freq;
                self.store_assembled(tick);
                last = tick;
            }
            self.last_update_tp = Some(last);
        }

        let packet_begin =
            DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(i64::from(self.frame_packet.utc()));
        let packet_end = packet_begin + self.publish_freq;

        let mut rotated = None;
        if stamp < packet_begin || stamp >= packet_end {
            if !self.frame_packet.is_empty() {
                rotated = Some(std::mem::take(&mut self.frame_packet));
            }
            self.frame_packet.prepare(stamp.timestamp() as u32);
        }

        if let Some(msg) = self.msgs.get_mut(&frame.can_id) {
            self.vin.decode_some(msg, frame);
            msg.assemble(stamp, frame, &mut self.tx_groups);
        }

        rotated
    }

    /// The reassembled vehicle identification number, once complete.
    pub fn vin(&self) -> Option<String> {
        self.vin.value()
    }

    pub fn message(&self, message_id: u32) -> Option<&TrMessage> {
        self.msgs.get(&message_id)
    }

    pub fn publish_freq(&self) -> TimeDelta {
        self.publish_freq
    }

    pub fn update_freq(&self) -> TimeDelta {
        self.update_freq
    }

    pub fn groups(&self) -> impl Iterator<Item = &TxGroup> {
        self.tx_groups.values()
    }

    /// First-frame initialization: seeds the packet and every group window.
    fn setup_timers(&mut self, first_stamp: CanTime) {
        if self.last_update_tp.is_some() {
            return;
        }
        self.frame_packet.prepare(first_stamp.timestamp() as u32);
        self.last_update_tp = Some(first_stamp);
        for group in self.tx_groups.values_mut() {
            group.time_begin(first_stamp);
        }
    }

    fn store_assembled(&mut self, up_to: CanTime) {
        for group in self.tx_groups.values_mut() {
            group.try_publish(up_to, &mut self.frame_packet);
        }
    }

    fn set_env_var(&mut self, name: &str, value: i64) {
        if name == TX_TIME_VAR {
            self.publish_freq = TimeDelta::milliseconds(value);
        } else if name.ends_with(GROUP_FREQ_SUFFIX) {
            self.tx_groups.insert(TxGroup::new(name, value));

            let current = self.update_freq.num_milliseconds();
            let next = if current == 0 { value } else { gcd(current, value) };
            self.update_freq = TimeDelta::milliseconds(next);
        }
    }

    fn assign_tx_group(&mut self, message_id: u32, group_name: &str) {
        let Some(key) = self
            .tx_groups
            .iter()
            .find(|(_, g)| g.name() == group_name)
            .map(|(k, _)| k)
        else {
            return;
        };
        if let Some(msg) = self.msgs.get_mut(&message_id) {
            msg.assign_group(key, message_id, &mut self.tx_groups);
        }
    }

    fn set_sig_agg_type(&mut self, message_id: u32, sig_name: &str, agg: AggKind) {
        if let Some(msg) = self.msgs.get_mut(&message_id) {
            msg.sig_agg_type(sig_name, agg);
        }
    }

    fn set_sig_val_type(&mut self, message_id: u32, sig_name: &str, tag: u32) {
        if let Some(msg) = self.msgs.get_mut(&message_id) {
            msg.sig_val_type(sig_name, tag);
        }
    }
}

/// Parser events the transcoder consumes; everything else keeps its no-op
/// default.
impl DbcInterpreter for V2cTranscoder {
    fn bo(&mut self, message_id: u32, name: String, _size: usize, _transmitter_ord: usize) {
        if name == VIN_MESSAGE {
            self.vin.set_message_id(message_id);
        }
        self.msgs.entry(message_id).or_default();
    }

    fn sg(&mut self, message_id: u32, sig: SignalDef) {
        let codec = SigCodec::new(sig.start_bit, sig.bit_size, sig.byte_order, sig.sign);
        let phys = PhysValue::new(sig.factor, sig.offset);
        let tr_sig =
            TrSignal::new(sig.name, codec, phys, sig.unit, sig.mux_val.map(i64::from));
        if let Some(msg) = self.msgs.get_mut(&message_id) {
            msg.add_signal(tr_sig);
        }
    }

    fn sg_mux(&mut self, message_id: u32, mux: MuxerDef) {
        let codec = SigCodec::new(mux.start_bit, mux.bit_size, mux.byte_order, mux.sign);
        if let Some(msg) = self.msgs.get_mut(&message_id) {
            msg.add_muxer(TrMuxer::new(codec));
        }
    }

    fn ev(&mut self, ev: EnvVarDef) {
        self.set_env_var(&ev.name, ev.initial as i64);
    }

    fn ba(&mut self, attr: String, target: BaTarget, value: AttrValue) {
        match (attr.as_str(), target, value) {
            (AGG_TYPE_ATTR, BaTarget::Signal { message_id, sig_name }, AttrValue::Str(v)) => {
                self.set_sig_agg_type(message_id, &sig_name, AggKind::from_attr(&v));
            }
            (TX_GROUP_ATTR, BaTarget::Message(message_id), AttrValue::Str(group)) => {
                self.assign_tx_group(message_id, &group);
            }
            _ => {}
        }
    }

    fn sig_valtype(&mut self, message_id: u32, sig_name: String, tag: u32) {
        self.set_sig_val_type(message_id, &sig_name, tag);
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: i64) -> CanTime {
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::milliseconds(ms)
    }

    fn env(name: &str, initial: f64) -> EnvVarDef {
        EnvVarDef {
            name: name.to_string(),
            ev_type: 0,
            min: 0.0,
            max: 60000.0,
            unit: "ms".to_string(),
            initial,
            ev_id: 1,
            access_type: "DUMMY_NODE_VECTOR0".to_string(),
            access_node_ords: vec![0],
        }
    }

    fn simple_signal(name: &str) -> SignalDef {
        SignalDef {
            name: name.to_string(),
            mux_val: None,
            start_bit: 0,
            bit_size: 16,
            byte_order: crate::can::codec::Endianness::Intel,
            sign: crate::can::codec::Signess::Unsigned,
            factor: 1.0,
            offset: 0.0,
            min: 0.0,
            max: 65535.0,
            unit: String::new(),
            receiver_ords: vec![0],
        }
    }

    fn build() -> V2cTranscoder {
        let mut tc = V2cTranscoder::new();
        tc.ev(env("V2CTxTime", 5000.0));
        tc.ev(env("FastGroupTxFreq", 1000.0));
        tc.ev(env("SlowGroupTxFreq", 1500.0));
        tc.bo(1, "EngineData".to_string(), 8, 0);
        tc.sg(1, simple_signal("EngineSpeed"));
        tc.ba(
            "TxGroupFreq".to_string(),
            BaTarget::Message(1),
            AttrValue::Str("FastGroupTxFreq".to_string()),
        );
        tc
    }

    #[test]
    fn test_update_freq_is_gcd_of_group_periods() {
        let tc = build();
        assert_eq!(tc.publish_freq(), TimeDelta::milliseconds(5000));
        assert_eq!(tc.update_freq(), TimeDelta::milliseconds(500));
        assert_eq!(tc.groups().count(), 2);
    }

    #[test]
    fn test_unknown_group_and_message_ignored() {
        let mut tc = build();
        tc.ba(
            "TxGroupFreq".to_string(),
            BaTarget::Message(99),
            AttrValue::Str("FastGroupTxFreq".to_string()),
        );
        tc.ba(
            "TxGroupFreq".to_string(),
            BaTarget::Message(1),
            AttrValue::Str("NoSuchGroup".to_string()),
        );
        tc.sig_valtype(42, "Nothing".to_string(), 0);
    }

    #[test]
    fn test_packet_rotation_on_publish_boundary() {
        let mut tc = build();
        let frame = CanFrame::new(1, 100u64.to_le_bytes());

        assert!(tc.transcode(t(0), &frame).is_none());
        assert!(tc.transcode(t(1000), &frame).is_none());
        // Crosses the 5 s publish window; the previous packet had a frame
        // published at the 1 s group boundary.
        let packet = tc.transcode(t(5000), &frame).expect("rotated packet");
        assert_eq!(packet.utc(), 0);
        assert!(packet.frames().count() >= 1);
    }

    #[test]
    fn test_unknown_frame_ids_only_drive_timers() {
        let mut tc = build();
        let known = CanFrame::new(1, 7u64.to_le_bytes());
        let unknown = CanFrame::new(0x7FF, [0xFF; 8]);

        assert!(tc.transcode(t(0), &known).is_none());
        // The flush frame advances past the group and publish boundaries.
        let packet = tc.transcode(t(6000), &unknown).expect("rotated packet");
        let frames: Vec<_> = packet.frames().collect();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].1.can_id, 1);
        assert_eq!(frames[0].1.data, 7u64.to_le_bytes());
    }

    #[test]
    fn test_multi_tick_catch_up_publishes_each_boundary() {
        let mut tc = build();
        let frame = CanFrame::new(1, 1u64.to_le_bytes());

        assert!(tc.transcode(t(0), &frame).is_none());
        // Jump four update periods ahead inside one publish window: the
        // first boundary publishes the collected slot, later ones find the
        // window empty and only slide the origin.
        assert!(tc.transcode(t(2100), &frame).is_none());

        let packet = tc.transcode(t(9000), &frame).expect("rotated packet");
        assert_eq!(packet.frames().count(), 2);
    }

    #[test]
    fn test_out_of_order_stamp_rotates_backwards() {
        let mut tc = build();
        let frame = CanFrame::new(1, 1u64.to_le_bytes());

        assert!(tc.transcode(t(10_000), &frame).is_none());
        assert!(tc.transcode(t(10_500), &frame).is_none());
        // An earlier stamp precedes the packet base: the engine reseeds at
        // the earlier time. The current packet had no published frames yet,
        // so nothing rotates out.
        assert!(tc.transcode(t(2_000), &frame).is_none());
        assert_eq!(tc.transcode(t(2_500), &frame), None);
    }
}
