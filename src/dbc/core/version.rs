use crate::dbc::parse::{ParseError, ParseState};

/// `VERSION "<string>"` — single optional statement.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    st.sc.end_cmd();
    if !st.sc.keyword("VERSION") {
        return Ok(());
    }
    let version = st.sc.quoted().ok_or_else(|| st.fail("VERSION"))?;
    st.sink.version(version);
    Ok(())
}
