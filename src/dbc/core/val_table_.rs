use crate::dbc::parse::{ParseError, ParseState};

/// `VAL_TABLE_ <name> (<value> "<desc>")* ;` — global value tables.
///
/// Each table gets a declaration ordinal, referenced later by `SGTYPE_`.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("VAL_TABLE_") {
            return Ok(());
        }
        let name = st.sc.ident().ok_or_else(|| st.fail("VAL_TABLE_"))?.to_string();

        let mut descs: Vec<(u32, String)> = Vec::new();
        while !st.sc.token(b';') {
            let value = st.sc.uint().ok_or_else(|| st.fail("VAL_TABLE_"))?;
            let desc = st.sc.quoted().ok_or_else(|| st.fail("VAL_TABLE_"))?;
            descs.push((value, desc));
        }

        let ord = st.val_tables.len();
        st.val_tables.insert(name.clone(), ord);
        st.sink.val_table(name, descs);
    }
}
