use crate::dbc::parse::{ParseError, ParseState};

/// `CM_ [BU_ <node> | BO_ <id> | SG_ <id> <signal> | EV_ <name>]
/// "<comment>" ;` — comments may span lines.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("CM_") {
            return Ok(());
        }

        if st.sc.keyword("SG_") {
            let message_id = st.sc.uint().ok_or_else(|| st.fail("CM_"))?;
            let sig_name = st.sc.ident().ok_or_else(|| st.fail("CM_"))?.to_string();
            let comment = st.sc.quoted().ok_or_else(|| st.fail("CM_"))?;
            end_stmt(st)?;
            st.sink.cm_sg(message_id, sig_name, comment);
        } else if st.sc.keyword("BO_") {
            let message_id = st.sc.uint().ok_or_else(|| st.fail("CM_"))?;
            let comment = st.sc.quoted().ok_or_else(|| st.fail("CM_"))?;
            end_stmt(st)?;
            st.sink.cm_bo(message_id, comment);
        } else if st.sc.keyword("BU_") {
            let node_ord = st.node_ord().ok_or_else(|| st.fail("CM_"))?;
            let comment = st.sc.quoted().ok_or_else(|| st.fail("CM_"))?;
            end_stmt(st)?;
            st.sink.cm_bu(node_ord, comment);
        } else if st.sc.keyword("EV_") {
            let ev_name = st.sc.ident().ok_or_else(|| st.fail("CM_"))?.to_string();
            let comment = st.sc.quoted().ok_or_else(|| st.fail("CM_"))?;
            end_stmt(st)?;
            st.sink.cm_ev(ev_name, comment);
        } else {
            let comment = st.sc.quoted().ok_or_else(|| st.fail("CM_"))?;
            end_stmt(st)?;
            st.sink.cm(comment);
        }
    }
}

fn end_stmt(st: &mut ParseState) -> Result<(), ParseError> {
    if st.sc.token(b';') { Ok(()) } else { Err(st.fail("CM_")) }
}
