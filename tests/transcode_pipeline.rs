//! Full-pipeline tests: DBC text in, frame packets out, under a synthetic
//! clock.

use chrono::{DateTime, TimeDelta, Utc};

use can_v2c::{CanFrame, CanTime, FramePacket, V2cTranscoder, parse_dbc};

fn t(ms: i64) -> CanTime {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::milliseconds(ms)
}

fn frame(id: u32, data: u64) -> CanFrame {
    CanFrame::new(id, data.to_le_bytes())
}

fn transcoder(src: &str) -> V2cTranscoder {
    let mut tc = V2cTranscoder::new();
    parse_dbc(src, &mut tc).expect("test DBC parses");
    tc
}

const GROUPED: &str = r#"VERSION "1"

BS_:

BU_: N

BO_ 256 Muxed : 8 N
 SG_ Page M : 0|8@1+ (1,0) [0|2] "" N
 SG_ A m1 : 8|8@1+ (1,0) [0|255] "" N
 SG_ B m2 : 8|8@1+ (1,0) [0|255] "" N
 SG_ Base : 16|8@1+ (1,0) [0|255] "" N

BO_ 512 Plain : 8 N
 SG_ P : 0|16@1+ (1,0) [0|65535] "" N

EV_ V2CTxTime : 0 [0|60000] "ms" 10000 1 DUMMY_NODE_VECTOR0 Vector__XXX;
EV_ TelGroupTxFreq : 0 [0|60000] "ms" 100 2 DUMMY_NODE_VECTOR0 Vector__XXX;

BA_DEF_ BO_ "TxGroupFreq" STRING ;
BA_ "TxGroupFreq" BO_ 256 "TelGroupTxFreq";
BA_ "TxGroupFreq" BO_ 512 "TelGroupTxFreq";
"#;

fn run_grouped() -> FramePacket {
    let mut tc = transcoder(GROUPED);
    assert!(tc.transcode(t(10), &frame(256, 0x0011_AA01)).is_none());
    assert!(tc.transcode(t(20), &frame(256, 0x0022_BB02)).is_none());
    assert!(tc.transcode(t(30), &frame(256, 0x0033_CC01)).is_none());
    assert!(tc.transcode(t(40), &frame(512, 0x1234)).is_none());
    // Flush: an unknown id whose stamp crosses the publish window.
    tc.transcode(t(10_000), &frame(999, 0)).expect("packet rotates")
}

#[test]
fn grouped_emission_order_and_flags() {
    let packet = run_grouped();
    let frames: Vec<(CanTime, CanFrame)> = packet.frames().collect();
    assert_eq!(frames.len(), 3);

    // Multiplexed message first (lower id), its latest slot leading the run
    // and flagged as the non-muxed carrier.
    assert_eq!(frames[0].1.can_id, 256);
    assert_eq!(frames[0].1.data, 0x0033_CC01u64.to_le_bytes());
    assert!(frames[0].1.non_muxed_carrier());

    assert_eq!(frames[1].1.can_id, 256);
    assert_eq!(frames[1].1.data, 0x0022_BB02u64.to_le_bytes());
    assert!(!frames[1].1.non_muxed_carrier());

    assert_eq!(frames[2].1.can_id, 512);
    assert_eq!(frames[2].1.data, 0x1234u64.to_le_bytes());
    assert!(frames[2].1.non_muxed_carrier());

    // All three published at the first 100 ms boundary after the window
    // origin (the first stamp, 10 ms).
    for (stamp, _) in &frames {
        assert_eq!(*stamp, t(110));
    }
}

#[test]
fn packet_bytes_are_exact() {
    let packet = run_grouped();

    let mut expected: Vec<u8> = Vec::new();
    expected.extend_from_slice(&100u16.to_le_bytes());
    expected.extend_from_slice(&0u32.to_le_bytes());
    for (id, data, flag) in [
        (256u32, 0x0033_CC01u64, 1u8),
        (256, 0x0022_BB02, 0),
        (512, 0x1234, 1),
    ] {
        expected.extend_from_slice(&110i32.to_le_bytes());
        expected.extend_from_slice(&id.to_le_bytes());
        expected.push(8);
        expected.push(flag);
        expected.extend_from_slice(&[0, 0]);
        expected.extend_from_slice(&data.to_le_bytes());
    }

    assert_eq!(packet.as_bytes(), expected.as_slice());
}

#[test]
fn identical_streams_give_identical_bytes() {
    let a = run_grouped();
    let b = run_grouped();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn missing_message_holds_back_the_whole_group() {
    let mut tc = transcoder(GROUPED);
    assert!(tc.transcode(t(10), &frame(512, 0xAB)).is_none());
    let packet = tc.transcode(t(10_000), &frame(999, 0)).expect("rotation");

    // The muxed message's slots were never collected, so the group held
    // back every boundary and only slid its window.
    assert_eq!(packet.frames().count(), 0);
}

#[test]
fn incomplete_group_never_publishes() {
    let mut tc = transcoder(GROUPED);
    // Only selector 1 of the muxed message ever arrives; the selector-2
    // slot stays empty, so the group holds back everything.
    for i in 0..50 {
        assert!(tc.transcode(t(10 + i * 10), &frame(256, 0x0011_AA01)).is_none());
    }
    let packet = tc.transcode(t(10_000), &frame(999, 0)).expect("rotation");
    assert_eq!(packet.frames().count(), 0);
}

const AVERAGED: &str = r#"BU_: N

BO_ 7 Sensor : 8 N
 SG_ Level : 0|16@1+ (1,0) [0|65535] "" N

EV_ V2CTxTime : 0 [0|60000] "ms" 10000 1 DUMMY_NODE_VECTOR0 Vector__XXX;
EV_ OneGroupTxFreq : 0 [0|60000] "ms" 100 2 DUMMY_NODE_VECTOR0 Vector__XXX;

BA_DEF_ SG_ "AggType" STRING ;
BA_DEF_ BO_ "TxGroupFreq" STRING ;
BA_ "AggType" SG_ 7 Level "AVG";
BA_ "TxGroupFreq" BO_ 7 "OneGroupTxFreq";
"#;

#[test]
fn averaged_signal_publishes_rounded_mean() {
    let mut tc = transcoder(AVERAGED);
    // Samples 2, 5, 7 inside one window: mean 4.67 rounds to 5.
    assert!(tc.transcode(t(10), &frame(7, 2)).is_none());
    assert!(tc.transcode(t(20), &frame(7, 5)).is_none());
    assert!(tc.transcode(t(30), &frame(7, 7)).is_none());

    let packet = tc.transcode(t(10_000), &frame(999, 0)).expect("rotation");
    let frames: Vec<_> = packet.frames().collect();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].1.data, 5u64.to_le_bytes());
}

#[test]
fn aggregators_reset_between_windows() {
    let mut tc = transcoder(AVERAGED);
    assert!(tc.transcode(t(10), &frame(7, 1000)).is_none());
    // Next window: the running sum must restart, not carry 1000 over.
    assert!(tc.transcode(t(150), &frame(7, 10)).is_none());
    assert!(tc.transcode(t(160), &frame(7, 20)).is_none());

    let packet = tc.transcode(t(10_000), &frame(999, 0)).expect("rotation");
    let frames: Vec<_> = packet.frames().collect();
    assert_eq!(frames.len(), 2);
    // First window published 1000, second the mean of 10 and 20.
    assert_eq!(frames[0].1.data, 1000u64.to_le_bytes());
    assert_eq!(frames[1].1.data, 15u64.to_le_bytes());
}

const WITH_VIN: &str = r#"BU_: N

BO_ 21 VIN : 8 N
 SG_ VinPage M : 0|8@1+ (1,0) [0|2] "" N
 SG_ VIN1 m0 : 8|8@1+ (1,0) [0|255] "" N
 SG_ VIN2 m0 : 16|8@1+ (1,0) [0|255] "" N
 SG_ VIN3 m0 : 24|8@1+ (1,0) [0|255] "" N
 SG_ VIN4 m0 : 32|8@1+ (1,0) [0|255] "" N
 SG_ VIN5 m0 : 40|8@1+ (1,0) [0|255] "" N
 SG_ VIN6 m0 : 48|8@1+ (1,0) [0|255] "" N
 SG_ VIN7 m0 : 56|8@1+ (1,0) [0|255] "" N
 SG_ VIN8 m1 : 8|8@1+ (1,0) [0|255] "" N
 SG_ VIN9 m1 : 16|8@1+ (1,0) [0|255] "" N
 SG_ VIN10 m1 : 24|8@1+ (1,0) [0|255] "" N
 SG_ VIN11 m1 : 32|8@1+ (1,0) [0|255] "" N
 SG_ VIN12 m1 : 40|8@1+ (1,0) [0|255] "" N
 SG_ VIN13 m1 : 48|8@1+ (1,0) [0|255] "" N
 SG_ VIN14 m1 : 56|8@1+ (1,0) [0|255] "" N
 SG_ VIN15 m2 : 8|8@1+ (1,0) [0|255] "" N
 SG_ VIN16 m2 : 16|8@1+ (1,0) [0|255] "" N
 SG_ VIN17 m2 : 24|8@1+ (1,0) [0|255] "" N

EV_ V2CTxTime : 0 [0|60000] "ms" 10000 1 DUMMY_NODE_VECTOR0 Vector__XXX;
"#;

#[test]
fn vin_completes_across_pages() {
    let mut tc = transcoder(WITH_VIN);
    let vin_text = b"WVWZZZ1JZXW000001";

    for page in 0..3u64 {
        assert_eq!(tc.vin(), None);
        let mut data = page;
        for (i, &ch) in vin_text.iter().skip(page as usize * 7).take(7).enumerate() {
            data |= u64::from(ch) << ((i + 1) * 8);
        }
        tc.transcode(t(10 + page as i64 * 10), &frame(21, data));
    }

    assert_eq!(tc.vin().as_deref(), Some("WVWZZZ1JZXW000001"));
}

#[test]
fn update_freq_divides_every_group_period() {
    let src = r#"BU_: N

EV_ V2CTxTime : 0 [0|60000] "ms" 10000 1 DUMMY_NODE_VECTOR0 Vector__XXX;
EV_ AGroupTxFreq : 0 [0|60000] "ms" 300 2 DUMMY_NODE_VECTOR0 Vector__XXX;
EV_ BGroupTxFreq : 0 [0|60000] "ms" 200 3 DUMMY_NODE_VECTOR0 Vector__XXX;
"#;
    let tc = transcoder(src);
    let update = tc.update_freq().num_milliseconds();
    assert_eq!(update, 100);
    for group in tc.groups() {
        assert_eq!(group.assemble_freq().num_milliseconds() % update, 0);
    }
}
