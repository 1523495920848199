//! Transcoder-side signal and multiplexer entities.

use log::warn;

use crate::can::codec::{PhysValue, SigCodec, Signess, ValType};

/// Aggregation policy attached to a signal via the `AggType` attribute.
///
/// Every signal aggregates as `Last` unless the attribute says otherwise; an
/// unrecognized attribute value opts the signal out of aggregation.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum AggKind {
    #[default]
    Last,
    Avg,
    None,
}

impl AggKind {
    pub(crate) fn from_attr(value: &str) -> AggKind {
        match value {
            "LAST" => AggKind::Last,
            "AVG" => AggKind::Avg,
            _ => AggKind::None,
        }
    }
}

/// One signal as the transcoder sees it: codec, scaling, aggregation policy
/// and, for multiplexed signals, the selector value gating it.
#[derive(Clone, PartialEq, Debug)]
pub struct TrSignal {
    name: String,
    codec: SigCodec,
    phys: PhysValue,
    unit: String,
    agg: AggKind,
    val_type: ValType,
    mux_val: Option<i64>,
}

impl TrSignal {
    pub fn new(
        name: impl Into<String>,
        codec: SigCodec,
        phys: PhysValue,
        unit: impl Into<String>,
        mux_val: Option<i64>,
    ) -> TrSignal {
        TrSignal {
            name: name.into(),
            codec,
            phys,
            unit: unit.into(),
            agg: AggKind::default(),
            val_type: ValType::default(),
            mux_val,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn mux_val(&self) -> Option<i64> {
        self.mux_val
    }

    /// Whether this signal is present in a frame whose multiplexer decoded
    /// to `frame_mux`. Non-multiplexed signals are always present.
    pub fn is_active(&self, frame_mux: i64) -> bool {
        self.mux_val.is_none_or(|m| m == frame_mux)
    }

    pub fn agg(&self) -> AggKind {
        self.agg
    }

    pub(crate) fn set_agg(&mut self, agg: AggKind) {
        self.agg = agg;
    }

    pub fn val_type(&self) -> ValType {
        self.val_type
    }

    /// Applies a `SIG_VALTYPE_` tag. Unknown tags fall back to `i64` with a
    /// diagnostic; an `i64` tag on an unsigned signal promotes to `u64`.
    pub(crate) fn set_val_type(&mut self, tag: u32) {
        let vt = ValType::from_tag(tag).unwrap_or_else(|| {
            warn!("signal {} has no valid value type (tag {tag}), assuming i64", self.name);
            ValType::I64
        });
        self.val_type = if vt == ValType::I64 && self.codec.sign() == Signess::Unsigned {
            ValType::U64
        } else {
            vt
        };
    }

    /// Extracts the raw signal value from a 64-bit payload word.
    pub fn decode(&self, data: u64) -> u64 {
        self.codec.decode(&data.to_le_bytes())
    }

    /// Re-encodes a raw value into an otherwise zero payload word.
    pub fn encode(&self, raw: u64) -> u64 {
        let mut buf = [0u8; 8];
        self.codec.encode(raw, &mut buf);
        u64::from_le_bytes(buf)
    }

    /// Physical value of a raw sample, through the declared value domain.
    pub fn phys(&self, raw: u64) -> f64 {
        self.phys.convert(raw, self.val_type)
    }
}

/// The multiplexer switch of a message.
#[derive(Clone, PartialEq, Debug)]
pub struct TrMuxer {
    codec: SigCodec,
}

impl TrMuxer {
    pub fn new(codec: SigCodec) -> TrMuxer {
        TrMuxer { codec }
    }

    pub fn decode(&self, data: u64) -> u64 {
        self.codec.decode(&data.to_le_bytes())
    }

    pub fn encode(&self, raw: u64) -> u64 {
        let mut buf = [0u8; 8];
        self.codec.encode(raw, &mut buf);
        u64::from_le_bytes(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::can::codec::Endianness;

    fn sig(sign: Signess) -> TrSignal {
        let codec = SigCodec::new(0, 8, Endianness::Intel, sign);
        TrSignal::new("Speed", codec, PhysValue::new(1.0, 0.0), "km/h", None)
    }

    #[test]
    fn test_mux_gating() {
        let codec = SigCodec::new(8, 8, Endianness::Intel, Signess::Unsigned);
        let muxed = TrSignal::new("CellV1", codec, PhysValue::new(0.001, 0.0), "V", Some(3));
        assert!(muxed.is_active(3));
        assert!(!muxed.is_active(2));
        assert!(sig(Signess::Unsigned).is_active(-1));
    }

    #[test]
    fn test_val_type_promotion() {
        let mut unsigned = sig(Signess::Unsigned);
        unsigned.set_val_type(0);
        assert_eq!(unsigned.val_type(), ValType::U64);

        let mut signed = sig(Signess::Signed);
        signed.set_val_type(0);
        assert_eq!(signed.val_type(), ValType::I64);

        let mut float = sig(Signess::Unsigned);
        float.set_val_type(1);
        assert_eq!(float.val_type(), ValType::F32);
    }

    #[test]
    fn test_bad_val_type_tag_defaults_to_int() {
        let mut s = sig(Signess::Signed);
        s.set_val_type(7);
        assert_eq!(s.val_type(), ValType::I64);
    }

    #[test]
    fn test_codec_round_trip_through_word() {
        let s = sig(Signess::Unsigned);
        let payload = 0x0000_0000_0000_00ABu64;
        assert_eq!(s.decode(payload), 0xAB);
        assert_eq!(s.encode(0xAB), 0xAB);
    }
}
