use crate::dbc::parse::{ParseError, ParseState};

/// `BU_: <node>*` — node list, newline-terminated.
///
/// Fills the node table with declaration ordinals and appends the
/// `Vector__XXX` sentinel, which later sections may reference as a
/// transmitter or receiver.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    st.sc.end_cmd();
    if !st.sc.keyword("BU_") {
        return Ok(());
    }
    if !st.sc.token(b':') {
        return Err(st.fail("BU_"));
    }

    let mut names: Vec<String> = Vec::new();
    while let Some(name) = st.sc.ident() {
        names.push(name.to_string());
    }

    for (ord, name) in names.iter().enumerate() {
        st.nodes.insert(name.clone(), ord);
    }
    st.nodes.insert("Vector__XXX".to_string(), names.len());

    st.sink.bu(names);
    Ok(())
}
