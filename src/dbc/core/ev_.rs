use crate::dbc::interpreter::EnvVarDef;
use crate::dbc::parse::{ParseError, ParseState};

/// `EV_ <name> : <type> [<min>|<max>] "<unit>" <initial> <id>
/// DUMMY_NODE_VECTOR<x> <node>,... ;`
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("EV_") {
            return Ok(());
        }
        let name = st.sc.ident().ok_or_else(|| st.fail("EV_"))?.to_string();
        if !st.sc.token(b':') {
            return Err(st.fail("EV_"));
        }
        let ev_type = st.sc.uint().filter(|t| *t <= 2).ok_or_else(|| st.fail("EV_"))?;
        if !st.sc.token(b'[') {
            return Err(st.fail("EV_"));
        }
        let min = st.sc.double().ok_or_else(|| st.fail("EV_"))?;
        if !st.sc.token(b'|') {
            return Err(st.fail("EV_"));
        }
        let max = st.sc.double().ok_or_else(|| st.fail("EV_"))?;
        if !st.sc.token(b']') {
            return Err(st.fail("EV_"));
        }
        let unit = st.sc.quoted().ok_or_else(|| st.fail("EV_"))?;
        let initial = st.sc.double().ok_or_else(|| st.fail("EV_"))?;
        let ev_id = st.sc.uint().ok_or_else(|| st.fail("EV_"))?;

        let access_type =
            st.sc.ident().filter(|s| is_access_type(s)).ok_or_else(|| st.fail("EV_"))?.to_string();

        let mut access_node_ords = vec![st.node_ord().ok_or_else(|| st.fail("EV_"))?];
        while st.sc.token(b',') {
            access_node_ords.push(st.node_ord().ok_or_else(|| st.fail("EV_"))?);
        }
        if !st.sc.token(b';') {
            return Err(st.fail("EV_"));
        }

        st.sink.ev(EnvVarDef {
            name,
            ev_type,
            min,
            max,
            unit,
            initial,
            ev_id,
            access_type,
            access_node_ords,
        });
    }
}

/// `DUMMY_NODE_VECTOR{0..3}` or `DUMMY_NODE_VECTOR800{0..3}`.
fn is_access_type(s: &str) -> bool {
    let Some(rest) = s.strip_prefix("DUMMY_NODE_VECTOR") else {
        return false;
    };
    let rest = rest.strip_prefix("800").unwrap_or(rest);
    matches!(rest, "0" | "1" | "2" | "3")
}
