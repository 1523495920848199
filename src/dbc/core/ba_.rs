use crate::dbc::core::attr_value;
use crate::dbc::interpreter::BaTarget;
use crate::dbc::parse::{ParseError, ParseState};

/// `BA_ "<attr>" [BU_ <node> | BO_ <id> | SG_ <id> <signal> | EV_ <name>]
/// <value> ;` — attribute assignment; the bare form targets the database
/// itself.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("BA_") {
            return Ok(());
        }
        let attr = st.sc.quoted().ok_or_else(|| st.fail("BA_"))?;

        let target = if st.sc.keyword("SG_") {
            let message_id = st.sc.uint().ok_or_else(|| st.fail("BA_"))?;
            let sig_name = st.sc.ident().ok_or_else(|| st.fail("BA_"))?.to_string();
            BaTarget::Signal { message_id, sig_name }
        } else if st.sc.keyword("BO_") {
            BaTarget::Message(st.sc.uint().ok_or_else(|| st.fail("BA_"))?)
        } else if st.sc.keyword("BU_") {
            BaTarget::Node(st.node_ord().ok_or_else(|| st.fail("BA_"))?)
        } else if st.sc.keyword("EV_") {
            BaTarget::EnvVar(st.sc.ident().ok_or_else(|| st.fail("BA_"))?.to_string())
        } else {
            BaTarget::Global
        };

        let value = attr_value::parse(st, &attr, "BA_")?;
        if !st.sc.token(b';') {
            return Err(st.fail("BA_"));
        }
        st.sink.ba(attr, target, value);
    }
}
