use crate::dbc::parse::{ParseError, ParseState};
use crate::dbc::scan::Scanner;

/// Section names that may appear in the `NS_` listing.
const NS_SYMBOLS: &[&str] = &[
    "NS_DESC_",
    "CM_",
    "BA_DEF_",
    "BA_",
    "VAL_",
    "CAT_DEF_",
    "CAT_",
    "FILTER",
    "BA_DEF_DEF_",
    "EV_DATA_",
    "ENVVAR_DATA_",
    "SGTYPE_",
    "SGTYPE_VAL_",
    "BA_DEF_SGTYPE_",
    "BA_SGTYPE_",
    "SIG_TYPE_REF_",
    "VAL_TABLE_",
    "SIG_GROUP_",
    "SIG_VALTYPE_",
    "SIGTYPE_VALTYPE_",
    "BO_TX_BU_",
    "BA_DEF_REL_",
    "BA_REL_",
    "BA_DEF_DEF_REL_",
    "BU_SG_REL_",
    "BU_EV_REL_",
    "BU_BO_REL_",
    "SG_MUL_VAL_",
];

/// `NS_ : <symbol>*` — names listing, accepted and discarded.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    st.sc.end_cmd();
    if !st.sc.keyword("NS_") {
        return Ok(());
    }
    if !st.sc.token(b':') {
        return Err(st.fail("NS_"));
    }
    loop {
        st.sc.end_cmd();
        if !eat_symbol(&mut st.sc) {
            return Ok(());
        }
    }
}

fn eat_symbol(sc: &mut Scanner) -> bool {
    NS_SYMBOLS.iter().any(|sym| sc.keyword(sym))
}
