use crate::dbc::core::sg_;
use crate::dbc::parse::{ParseError, ParseState};

/// `BO_ <id> <name> : <size> <transmitter>` followed by the message's `SG_`
/// lines.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("BO_") {
            return Ok(());
        }
        let message_id = st.sc.uint().ok_or_else(|| st.fail("BO_"))?;
        let name = st.sc.ident().ok_or_else(|| st.fail("BO_"))?.to_string();
        if !st.sc.token(b':') {
            return Err(st.fail("BO_"));
        }
        let size = st.sc.uint().ok_or_else(|| st.fail("BO_"))? as usize;
        let transmitter_ord = st.node_ord().ok_or_else(|| st.fail("BO_"))?;

        st.sink.bo(message_id, name, size, transmitter_ord);

        sg_::parse(st, message_id)?;
    }
}
