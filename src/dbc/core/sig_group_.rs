use crate::dbc::parse::{ParseError, ParseState};

/// `SIG_GROUP_ <msg_id> <name> <repetitions> : <signal>,... ;`
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("SIG_GROUP_") {
            return Ok(());
        }
        let message_id = st.sc.uint().ok_or_else(|| st.fail("SIG_GROUP_"))?;
        let name = st.sc.ident().ok_or_else(|| st.fail("SIG_GROUP_"))?.to_string();
        let repetitions = st.sc.uint().ok_or_else(|| st.fail("SIG_GROUP_"))?;
        if !st.sc.token(b':') {
            return Err(st.fail("SIG_GROUP_"));
        }
        let mut sig_names = vec![st.sc.ident().ok_or_else(|| st.fail("SIG_GROUP_"))?.to_string()];
        while st.sc.token(b',') {
            sig_names.push(st.sc.ident().ok_or_else(|| st.fail("SIG_GROUP_"))?.to_string());
        }
        if !st.sc.token(b';') {
            return Err(st.fail("SIG_GROUP_"));
        }
        st.sink.sig_group(message_id, name, repetitions, sig_names);
    }
}
