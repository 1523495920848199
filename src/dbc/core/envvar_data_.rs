use crate::dbc::parse::{ParseError, ParseState};

/// `ENVVAR_DATA_ <name> : <size> ;`
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("ENVVAR_DATA_") {
            return Ok(());
        }
        let name = st.sc.ident().ok_or_else(|| st.fail("ENVVAR_DATA_"))?.to_string();
        if !st.sc.token(b':') {
            return Err(st.fail("ENVVAR_DATA_"));
        }
        let data_size = st.sc.uint().ok_or_else(|| st.fail("ENVVAR_DATA_"))?;
        if !st.sc.token(b';') {
            return Err(st.fail("ENVVAR_DATA_"));
        }
        st.sink.envvar_data(name, data_size);
    }
}
