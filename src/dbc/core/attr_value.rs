use crate::dbc::interpreter::AttrValue;
use crate::dbc::parse::{AttrKind, ParseError, ParseState};

/// Parses an attribute value in the shape the attribute's `BA_DEF_`
/// declaration fixed: the same `<value>` position may hold a quoted string,
/// an integer or a double depending on the declared type.
///
/// Values of attributes that were never declared parse with a generic rule
/// (string, then number) and are still dispatched; consumers ignore names
/// they do not know.
pub(crate) fn parse(
    st: &mut ParseState,
    attr: &str,
    section: &'static str,
) -> Result<AttrValue, ParseError> {
    match st.attr_types.get(attr).copied() {
        Some(AttrKind::Int) => {
            let v = st.sc.int().ok_or_else(|| st.fail(section))?;
            Ok(AttrValue::Int(v))
        }
        Some(AttrKind::Float) => {
            let v = st.sc.double().ok_or_else(|| st.fail(section))?;
            Ok(AttrValue::Double(v))
        }
        Some(AttrKind::Str) => {
            let v = st.sc.quoted().ok_or_else(|| st.fail(section))?;
            Ok(AttrValue::Str(v))
        }
        // Enum values are written either as the enumerator string or as its
        // index.
        Some(AttrKind::Enum) => match st.sc.quoted() {
            Some(v) => Ok(AttrValue::Str(v)),
            None => {
                let v = st.sc.int().ok_or_else(|| st.fail(section))?;
                Ok(AttrValue::Int(v))
            }
        },
        None => generic(st, section),
    }
}

fn generic(st: &mut ParseState, section: &'static str) -> Result<AttrValue, ParseError> {
    if let Some(v) = st.sc.quoted() {
        return Ok(AttrValue::Str(v));
    }
    let v = st.sc.double().ok_or_else(|| st.fail(section))?;
    if v.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v) {
        Ok(AttrValue::Int(v as i32))
    } else {
        Ok(AttrValue::Double(v))
    }
}
