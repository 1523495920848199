//! Vehicle Identification Number reassembly.
//!
//! The VIN arrives one character per signal: signals of the `VIN` message
//! named `VIN<n>` (1-based) each decode to one character. Characters fill in
//! lazily as frames arrive, across multiplex pages if the message is muxed.

use crate::can::frame::CanFrame;
use crate::v2c::message::TrMessage;

/// Industry-standard VIN length.
const VIN_LEN: usize = 17;

/// Collects VIN characters and a completion mask.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VinAssembler {
    vin_msg_id: Option<u32>,
    cbits: u32,
    vin: [u8; VIN_LEN],
}

impl Default for VinAssembler {
    fn default() -> VinAssembler {
        VinAssembler { vin_msg_id: None, cbits: 0, vin: [0; VIN_LEN] }
    }
}

impl VinAssembler {
    pub fn is_complete(&self) -> bool {
        self.cbits == (1 << VIN_LEN) - 1
    }

    /// The full identifier once all 17 characters arrived.
    pub fn value(&self) -> Option<String> {
        self.is_complete().then(|| String::from_utf8_lossy(&self.vin).into_owned())
    }

    pub(crate) fn set_message_id(&mut self, id: u32) {
        self.vin_msg_id = Some(id);
    }

    /// Harvests VIN characters from a frame of the designated message.
    /// Returns whether any new character arrived.
    pub(crate) fn decode_some(&mut self, msg: &TrMessage, frame: &CanFrame) -> bool {
        if self.vin_msg_id != Some(frame.can_id) {
            return false;
        }
        let old_bits = self.cbits;
        let data = frame.data_u64();
        for sig in msg.signals(data) {
            let Some(chidx) = vin_char(sig.name()) else {
                continue;
            };
            self.vin[chidx - 1] = sig.decode(data) as u8;
            self.cbits |= 1 << (chidx - 1);
        }
        self.cbits != old_bits
    }
}

/// 1-based character index from a `VIN<n>` signal name.
fn vin_char(sig_name: &str) -> Option<usize> {
    if !sig_name.starts_with("VIN") {
        return None;
    }
    let digits = sig_name.len() - sig_name.bytes().rev().take_while(u8::is_ascii_digit).count();
    let idx: usize = sig_name[digits..].parse().ok()?;
    (1..=VIN_LEN).contains(&idx).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::can::codec::{Endianness, PhysValue, SigCodec, Signess};
    use crate::v2c::signal::TrSignal;

    #[test]
    fn test_vin_char_parses_trailing_digits() {
        assert_eq!(vin_char("VIN1"), Some(1));
        assert_eq!(vin_char("VIN17"), Some(17));
        assert_eq!(vin_char("VINChar9"), Some(9));
        assert_eq!(vin_char("VIN"), None);
        assert_eq!(vin_char("VIN0"), None);
        assert_eq!(vin_char("VIN18"), None);
        assert_eq!(vin_char("Speed2"), None);
    }

    #[test]
    fn test_completion_over_multiple_frames() {
        // Eight VIN characters per frame in the low bytes, one page at a time.
        let mut msg = TrMessage::default();
        for i in 0..VIN_LEN {
            let start = (i % 8) as u32 * 8;
            let codec = SigCodec::new(start, 8, Endianness::Intel, Signess::Unsigned);
            let sig = TrSignal::new(
                format!("VIN{}", i + 1),
                codec,
                PhysValue::new(1.0, 0.0),
                "",
                Some((i / 8) as i64),
            );
            msg.add_signal(sig);
        }
        let mux_codec = SigCodec::new(56, 8, Endianness::Intel, Signess::Unsigned);
        msg.add_muxer(crate::v2c::signal::TrMuxer::new(mux_codec));

        let vin_text = b"WVWZZZ1JZXW000001";
        let mut vin = VinAssembler::default();
        vin.set_message_id(0x55);

        for page in 0..3u64 {
            let mut data = page << 56;
            for i in 0..8 {
                let chidx = page as usize * 8 + i;
                if chidx < VIN_LEN {
                    data |= u64::from(vin_text[chidx]) << (i * 8);
                }
            }
            assert_eq!(vin.value(), None);
            let frame = CanFrame::new(0x55, data.to_le_bytes());
            assert!(vin.decode_some(&msg, &frame));
        }

        assert!(vin.is_complete());
        assert_eq!(vin.value().as_deref(), Some("WVWZZZ1JZXW000001"));
    }

    #[test]
    fn test_other_message_ids_ignored() {
        let msg = TrMessage::default();
        let mut vin = VinAssembler::default();
        vin.set_message_id(0x55);
        assert!(!vin.decode_some(&msg, &CanFrame::new(0x77, [0; 8])));

        let mut unset = VinAssembler::default();
        assert!(!unset.decode_some(&msg, &CanFrame::new(0x55, [0; 8])));
    }
}
