use crate::dbc::parse::{ParseError, ParseState};

/// `BS_: [<speed> : <btr1> , <btr2>]` — bus-speed header, shape-validated
/// and discarded.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    st.sc.end_cmd();
    if !st.sc.keyword("BS_") {
        return Ok(());
    }
    if !st.sc.token(b':') {
        return Err(st.fail("BS_"));
    }
    if st.sc.uint().is_some() {
        let ok = st.sc.token(b':')
            && st.sc.uint().is_some()
            && st.sc.token(b',')
            && st.sc.uint().is_some();
        if !ok {
            return Err(st.fail("BS_"));
        }
    }
    Ok(())
}
