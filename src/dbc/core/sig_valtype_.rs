use crate::dbc::parse::{ParseError, ParseState};

/// `SIG_VALTYPE_ <msg_id> <signal> : <tag> ;`
///
/// The tag's first digit must be 0..=3; longer numerals still parse, and the
/// consumer diagnoses values outside the known range.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("SIG_VALTYPE_") {
            return Ok(());
        }
        let message_id = st.sc.uint().ok_or_else(|| st.fail("SIG_VALTYPE_"))?;
        let sig_name = st.sc.ident().ok_or_else(|| st.fail("SIG_VALTYPE_"))?.to_string();
        if !st.sc.token(b':') {
            return Err(st.fail("SIG_VALTYPE_"));
        }
        let tag =
            st.sc.uint().filter(|&t| leading_digit(t) <= 3).ok_or_else(|| st.fail("SIG_VALTYPE_"))?;
        if !st.sc.token(b';') {
            return Err(st.fail("SIG_VALTYPE_"));
        }
        st.sink.sig_valtype(message_id, sig_name, tag);
    }
}

fn leading_digit(mut t: u32) -> u32 {
    while t >= 10 {
        t /= 10;
    }
    t
}
