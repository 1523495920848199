use log::warn;

use crate::can::codec::{Endianness, Signess};
use crate::dbc::interpreter::{MuxerDef, SignalDef};
use crate::dbc::parse::{ParseError, ParseState};

/// `SG_ <name> [m<N>|M] : <start>|<size>@<ord><sign> (<factor>,<offset>)
/// [<min>|<max>] "<unit>" <receiver>,...`
///
/// One statement per signal of the enclosing `BO_`. A bare `M` marks the
/// multiplexer switch and emits `sg_mux`; `m<N>` marks a multiplexed signal
/// with selector `N`.
pub(crate) fn parse(st: &mut ParseState, message_id: u32) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("SG_") {
            return Ok(());
        }

        let name = st.sc.ident().ok_or_else(|| st.fail("SG_"))?.to_string();

        let mut mux_val: Option<u32> = None;
        if st.sc.token(b'm') {
            mux_val = Some(st.sc.uint().ok_or_else(|| st.fail("SG_"))?);
        }
        let is_muxer = st.sc.token(b'M');

        if !st.sc.token(b':') {
            return Err(st.fail("SG_"));
        }
        let start_bit = st.sc.uint().ok_or_else(|| st.fail("SG_"))?;
        if !st.sc.token(b'|') {
            return Err(st.fail("SG_"));
        }
        let bit_size = st.sc.uint().ok_or_else(|| st.fail("SG_"))?;
        if !st.sc.token(b'@') {
            return Err(st.fail("SG_"));
        }
        let byte_order = if st.sc.token(b'1') {
            Endianness::Intel
        } else if st.sc.token(b'0') {
            Endianness::Motorola
        } else {
            return Err(st.fail("SG_"));
        };
        let sign = if st.sc.token(b'+') {
            Signess::Unsigned
        } else if st.sc.token(b'-') {
            Signess::Signed
        } else {
            return Err(st.fail("SG_"));
        };

        if !st.sc.token(b'(') {
            return Err(st.fail("SG_"));
        }
        let factor = st.sc.double().ok_or_else(|| st.fail("SG_"))?;
        if !st.sc.token(b',') {
            return Err(st.fail("SG_"));
        }
        let offset = st.sc.double().ok_or_else(|| st.fail("SG_"))?;
        if !st.sc.token(b')') {
            return Err(st.fail("SG_"));
        }

        if !st.sc.token(b'[') {
            return Err(st.fail("SG_"));
        }
        let min = st.sc.double().ok_or_else(|| st.fail("SG_"))?;
        if !st.sc.token(b'|') {
            return Err(st.fail("SG_"));
        }
        let max = st.sc.double().ok_or_else(|| st.fail("SG_"))?;
        if !st.sc.token(b']') {
            return Err(st.fail("SG_"));
        }

        let unit = st.sc.quoted().ok_or_else(|| st.fail("SG_"))?;

        let mut receiver_ords = vec![st.node_ord().ok_or_else(|| st.fail("SG_"))?];
        while st.sc.token(b',') {
            receiver_ords.push(st.node_ord().ok_or_else(|| st.fail("SG_"))?);
        }

        if is_muxer {
            st.sink.sg_mux(
                message_id,
                MuxerDef { name, start_bit, bit_size, byte_order, sign, unit, receiver_ords },
            );
            continue;
        }

        if factor.abs() <= f64::EPSILON {
            warn!("signal {name} in message {message_id} has zero factor, dropping");
            continue;
        }

        st.sink.sg(
            message_id,
            SignalDef {
                name,
                mux_val,
                start_bit,
                bit_size,
                byte_order,
                sign,
                factor,
                offset,
                min,
                max,
                unit,
                receiver_ords,
            },
        );
    }
}
