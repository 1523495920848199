use crate::dbc::interpreter::ObjectKind;
use crate::dbc::parse::{AttrKind, ParseError, ParseState};

/// `BA_DEF_ [BU_|BO_|SG_|EV_] "<attr>" INT|HEX|FLOAT|STRING|ENUM ... ;`
///
/// Records the declared value kind so later `BA_DEF_DEF_` and `BA_`
/// statements can parse their values context-sensitively.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("BA_DEF_") {
            return Ok(());
        }

        let object = if st.sc.keyword("BU_") {
            Some(ObjectKind::Node)
        } else if st.sc.keyword("BO_") {
            Some(ObjectKind::Message)
        } else if st.sc.keyword("SG_") {
            Some(ObjectKind::Signal)
        } else if st.sc.keyword("EV_") {
            Some(ObjectKind::EnvVar)
        } else {
            None
        };

        let attr = st.sc.quoted().ok_or_else(|| st.fail("BA_DEF_"))?;

        if st.sc.keyword("INT") || st.sc.keyword("HEX") {
            let min = st.sc.int().ok_or_else(|| st.fail("BA_DEF_"))?;
            let max = st.sc.int().ok_or_else(|| st.fail("BA_DEF_"))?;
            end_stmt(st)?;
            st.attr_types.insert(attr.clone(), AttrKind::Int);
            st.sink.ba_def_int(attr, object, min, max);
        } else if st.sc.keyword("FLOAT") {
            let min = st.sc.double().ok_or_else(|| st.fail("BA_DEF_"))?;
            let max = st.sc.double().ok_or_else(|| st.fail("BA_DEF_"))?;
            end_stmt(st)?;
            st.attr_types.insert(attr.clone(), AttrKind::Float);
            st.sink.ba_def_float(attr, object, min, max);
        } else if st.sc.keyword("STRING") {
            end_stmt(st)?;
            st.attr_types.insert(attr.clone(), AttrKind::Str);
            st.sink.ba_def_string(attr, object);
        } else if st.sc.keyword("ENUM") {
            let mut values = Vec::new();
            if let Some(first) = st.sc.quoted() {
                values.push(first);
                while st.sc.token(b',') {
                    values.push(st.sc.quoted().ok_or_else(|| st.fail("BA_DEF_"))?);
                }
            }
            end_stmt(st)?;
            st.attr_types.insert(attr.clone(), AttrKind::Enum);
            st.sink.ba_def_enum(attr, object, values);
        } else {
            return Err(st.fail("BA_DEF_"));
        }
    }
}

fn end_stmt(st: &mut ParseState) -> Result<(), ParseError> {
    if st.sc.token(b';') { Ok(()) } else { Err(st.fail("BA_DEF_")) }
}
