use crate::can::codec::{Endianness, Signess};
use crate::dbc::interpreter::SigTypeDef;
use crate::dbc::parse::{ParseError, ParseState};

/// Either a signal type definition
/// `SGTYPE_ <name> : <size>@<ord><sign> (<f>,<o>) [<min>|<max>] "<unit>"
/// <default> , <val_table> ;`
/// or a per-signal reference `SGTYPE_ <msg_id> <signal> : <type> ;`.
pub(crate) fn parse(st: &mut ParseState) -> Result<(), ParseError> {
    loop {
        st.sc.end_cmd();
        if !st.sc.keyword("SGTYPE_") {
            return Ok(());
        }

        if let Some(message_id) = st.sc.uint() {
            let sig_name = st.sc.ident().ok_or_else(|| st.fail("SGTYPE_"))?.to_string();
            if !st.sc.token(b':') {
                return Err(st.fail("SGTYPE_"));
            }
            let type_name = st.sc.ident().ok_or_else(|| st.fail("SGTYPE_"))?.to_string();
            if !st.sc.token(b';') {
                return Err(st.fail("SGTYPE_"));
            }
            st.sink.sgtype_ref(message_id, sig_name, type_name);
            continue;
        }

        let name = st.sc.ident().ok_or_else(|| st.fail("SGTYPE_"))?.to_string();
        if !st.sc.token(b':') {
            return Err(st.fail("SGTYPE_"));
        }
        let bit_size = st.sc.uint().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b'@') {
            return Err(st.fail("SGTYPE_"));
        }
        let byte_order = if st.sc.token(b'1') {
            Endianness::Intel
        } else if st.sc.token(b'0') {
            Endianness::Motorola
        } else {
            return Err(st.fail("SGTYPE_"));
        };
        let sign = if st.sc.token(b'+') {
            Signess::Unsigned
        } else if st.sc.token(b'-') {
            Signess::Signed
        } else {
            return Err(st.fail("SGTYPE_"));
        };
        if !st.sc.token(b'(') {
            return Err(st.fail("SGTYPE_"));
        }
        let factor = st.sc.double().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b',') {
            return Err(st.fail("SGTYPE_"));
        }
        let offset = st.sc.double().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b')') {
            return Err(st.fail("SGTYPE_"));
        }
        if !st.sc.token(b'[') {
            return Err(st.fail("SGTYPE_"));
        }
        let min = st.sc.double().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b'|') {
            return Err(st.fail("SGTYPE_"));
        }
        let max = st.sc.double().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b']') {
            return Err(st.fail("SGTYPE_"));
        }
        let unit = st.sc.quoted().ok_or_else(|| st.fail("SGTYPE_"))?;
        let default_value = st.sc.double().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b',') {
            return Err(st.fail("SGTYPE_"));
        }
        let table = st.sc.ident().ok_or_else(|| st.fail("SGTYPE_"))?;
        let val_table_ord =
            st.val_tables.get(table).copied().ok_or_else(|| st.fail("SGTYPE_"))?;
        if !st.sc.token(b';') {
            return Err(st.fail("SGTYPE_"));
        }

        st.sink.sgtype(SigTypeDef {
            name,
            bit_size,
            byte_order,
            sign,
            factor,
            offset,
            min,
            max,
            unit,
            default_value,
            val_table_ord,
        });
    }
}
