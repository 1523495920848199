use crate::dbc::core::attr_value;
use crate::dbc::parse::{ParseError, ParseState};

/// `BA_DEF_DEF_ "<attr>" <value> ;` — attribute defaults. The relation form
/// `BA_DEF_DEF_REL_` is accepted with the same body.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("BA_DEF_DEF_REL_") && !st.sc.keyword("BA_DEF_DEF_") {
            return Ok(());
        }
        let attr = st.sc.quoted().ok_or_else(|| st.fail("BA_DEF_DEF_"))?;
        let value = attr_value::parse(st, &attr, "BA_DEF_DEF_")?;
        if !st.sc.token(b';') {
            return Err(st.fail("BA_DEF_DEF_"));
        }
        st.sink.ba_def_def(attr, value);
    }
}
