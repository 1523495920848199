//! LAST / AVG signal reducers.
//!
//! Each reducer consumes `(active multiplex value, payload word)` pairs and
//! returns the signal's re-encoded payload fragment, or zero when the signal
//! is inactive for the frame's multiplex value. Fragments of distinct
//! signals occupy disjoint bit ranges, so the message assembler ORs them
//! together losslessly.

use crate::can::codec::SigValue;
use crate::v2c::signal::{AggKind, TrSignal};

/// A signal reducer; one per aggregating signal of a message.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum SigAsm {
    Last(SigLast),
    Avg(SigAvg),
}

impl SigAsm {
    /// Builds the reducer the signal's aggregation policy asks for, or
    /// `None` when the signal opted out.
    pub(crate) fn for_signal(sig: &TrSignal) -> Option<SigAsm> {
        match sig.agg() {
            AggKind::Last => Some(SigAsm::Last(SigLast { sig: sig.clone() })),
            AggKind::Avg => Some(SigAsm::Avg(SigAvg::new(sig.clone()))),
            AggKind::None => None,
        }
    }

    pub(crate) fn assemble(&mut self, mux_val: i64, data: u64) -> u64 {
        match self {
            SigAsm::Last(last) => last.assemble(mux_val, data),
            SigAsm::Avg(avg) => avg.assemble(mux_val, data),
        }
    }

    pub(crate) fn reset(&mut self) {
        match self {
            SigAsm::Last(_) => {}
            SigAsm::Avg(avg) => avg.reset(),
        }
    }
}

/// Keeps the most recent sample within the window.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct SigLast {
    sig: TrSignal,
}

impl SigLast {
    fn assemble(&mut self, mux_val: i64, data: u64) -> u64 {
        if !self.sig.is_active(mux_val) {
            return 0;
        }
        self.sig.encode(self.sig.decode(data))
    }
}

/// Accumulates a typed running sum and emits the rounded mean.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct SigAvg {
    sig: TrSignal,
    sum: SigValue,
    num_samples: u64,
}

impl SigAvg {
    fn new(sig: TrSignal) -> SigAvg {
        let sum = SigValue::zero(sig.val_type());
        SigAvg { sig, sum, num_samples: 0 }
    }

    fn assemble(&mut self, mux_val: i64, data: u64) -> u64 {
        if !self.sig.is_active(mux_val) {
            return 0;
        }
        let raw = self.sig.decode(data);
        self.sum = if self.num_samples == 0 {
            SigValue::from_raw(self.sig.val_type(), raw)
        } else {
            self.sum.add_raw(raw)
        };
        self.num_samples += 1;

        self.sig.encode(self.sum.div_round(self.num_samples).to_raw())
    }

    fn reset(&mut self) {
        self.sum = SigValue::zero(self.sig.val_type());
        self.num_samples = 0;
    }
}
