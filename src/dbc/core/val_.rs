use crate::dbc::parse::{ParseError, ParseState};

/// `VAL_ <msg_id> <signal> (<value> "<desc>")* ;` or
/// `VAL_ <env_var> (<value> "<desc>")* ;`
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("VAL_") {
            return Ok(());
        }

        // A leading number targets a message signal, a name an env var.
        if let Some(message_id) = st.sc.uint() {
            let sig_name = st.sc.ident().ok_or_else(|| st.fail("VAL_"))?.to_string();
            let descs = descriptions(st)?;
            st.sink.val_sg(message_id, sig_name, descs);
        } else {
            let ev_name = st.sc.ident().ok_or_else(|| st.fail("VAL_"))?.to_string();
            let descs = descriptions(st)?;
            st.sink.val_env(ev_name, descs);
        }
    }
}

fn descriptions(st: &mut ParseState) -> Result<Vec<(u32, String)>, ParseError> {
    let mut descs = Vec::new();
    while !st.sc.token(b';') {
        let value = st.sc.uint().ok_or_else(|| st.fail("VAL_"))?;
        let desc = st.sc.quoted().ok_or_else(|| st.fail("VAL_"))?;
        descs.push((value, desc));
    }
    Ok(descs)
}
