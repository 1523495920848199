use crate::dbc::parse::{ParseError, ParseState};

/// `SG_MUL_VAL_ <msg_id> <muxed signal> <mux switch> <min>-<max>,... ;`
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("SG_MUL_VAL_") {
            return Ok(());
        }
        let message_id = st.sc.uint().ok_or_else(|| st.fail("SG_MUL_VAL_"))?;
        let muxed_sig = st.sc.ident().ok_or_else(|| st.fail("SG_MUL_VAL_"))?.to_string();
        let mux_switch = st.sc.ident().ok_or_else(|| st.fail("SG_MUL_VAL_"))?.to_string();

        let mut ranges = vec![range(st)?];
        while st.sc.token(b',') {
            ranges.push(range(st)?);
        }
        if !st.sc.token(b';') {
            return Err(st.fail("SG_MUL_VAL_"));
        }
        st.sink.sg_mul_val(message_id, muxed_sig, mux_switch, ranges);
    }
}

fn range(st: &mut ParseState) -> Result<(u32, u32), ParseError> {
    let min = st.sc.uint().ok_or_else(|| st.fail("SG_MUL_VAL_"))?;
    if !st.sc.token(b'-') {
        return Err(st.fail("SG_MUL_VAL_"));
    }
    let max = st.sc.uint().ok_or_else(|| st.fail("SG_MUL_VAL_"))?;
    Ok((min, max))
}
