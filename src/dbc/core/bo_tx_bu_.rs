use crate::dbc::parse::{ParseError, ParseState};

/// `BO_TX_BU_ <id> : <transmitter>,... ;`
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("BO_TX_BU_") {
            return Ok(());
        }
        let message_id = st.sc.uint().ok_or_else(|| st.fail("BO_TX_BU_"))?;
        if !st.sc.token(b':') {
            return Err(st.fail("BO_TX_BU_"));
        }
        let mut transmitters =
            vec![st.sc.ident().ok_or_else(|| st.fail("BO_TX_BU_"))?.to_string()];
        while st.sc.token(b',') {
            transmitters.push(st.sc.ident().ok_or_else(|| st.fail("BO_TX_BU_"))?.to_string());
        }
        if !st.sc.token(b';') {
            return Err(st.fail("BO_TX_BU_"));
        }
        st.sink.bo_tx_bu(message_id, transmitters);
    }
}
