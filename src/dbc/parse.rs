//! Fixed-order DBC section driver.
//!
//! Sections are consumed in the order the DBC specification fixes them; a
//! section whose keyword never appears simply contributes zero statements,
//! but a later section must not precede an earlier one. The first statement
//! whose keyword matched and whose body did not parse aborts with a
//! [`ParseError`] naming the offending line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};

use encoding_rs::WINDOWS_1252;
use thiserror::Error;

use crate::dbc::core;
use crate::dbc::interpreter::DbcInterpreter;
use crate::dbc::scan::Scanner;

/// Syntax error: the one-line diagnostic for the statement that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error in {section} section at line {line}:\n => {text}")]
pub struct ParseError {
    /// Keyword of the section being parsed.
    pub section: &'static str,
    /// 1-based line number of the failure.
    pub line: usize,
    /// Text of the offending line.
    pub text: String,
}

/// Errors produced while loading a `.dbc` file from disk.
#[derive(Debug, Error)]
pub enum DbcFileError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// How values of one attribute parse in `BA_DEF_DEF_` / `BA_` statements.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum AttrKind {
    Int,
    Float,
    Str,
    Enum,
}

/// Scanner plus the cross-table state the grammar needs.
pub(crate) struct ParseState<'a, 'i> {
    pub(crate) sc: Scanner<'a>,
    /// `BU_` names to ordinals, with the `Vector__XXX` sentinel last.
    pub(crate) nodes: HashMap<String, usize>,
    /// `VAL_TABLE_` names to ordinals.
    pub(crate) val_tables: HashMap<String, usize>,
    /// Declared attribute value kinds, keyed by attribute name.
    pub(crate) attr_types: HashMap<String, AttrKind>,
    pub(crate) sink: &'i mut dyn DbcInterpreter,
}

impl<'a, 'i> ParseState<'a, 'i> {
    fn new(src: &'a str, sink: &'i mut dyn DbcInterpreter) -> ParseState<'a, 'i> {
        ParseState {
            sc: Scanner::new(src),
            nodes: HashMap::new(),
            val_tables: HashMap::new(),
            attr_types: HashMap::new(),
            sink,
        }
    }

    /// Builds the diagnostic for a body that failed to parse.
    pub(crate) fn fail(&self, section: &'static str) -> ParseError {
        let (line, text) = self.sc.line_info();
        ParseError { section, line, text: text.to_string() }
    }

    /// Resolves a node name against the `BU_` table.
    pub(crate) fn node_ord(&mut self) -> Option<usize> {
        let name = self.sc.ident()?;
        self.nodes.get(name).copied()
    }
}

/// Parses a complete DBC document, driving `sink` with one event per
/// statement.
///
/// Consumes the entire input; trailing whitespace and comments are fine, any
/// other leftover text is a syntax error.
pub fn parse_dbc(src: &str, sink: &mut dyn DbcInterpreter) -> Result<(), ParseError> {
    let mut st = ParseState::new(src, sink);

    core::version::parse(&mut st)?;
    core::ns_::parse(&mut st)?;
    core::bs_::parse(&mut st)?;
    core::bu_::parse(&mut st)?;
    core::val_table_::parse(&mut st)?;
    core::bo_::parse(&mut st)?;
    core::bo_tx_bu_::parse(&mut st)?;
    core::ev_::parse(&mut st)?;
    core::envvar_data_::parse(&mut st)?;
    core::val_::parse(&mut st)?;
    core::sgtype_::parse(&mut st)?;
    core::sig_group_::parse(&mut st)?;
    core::cm_::parse(&mut st)?;
    core::ba_def_::parse(&mut st)?;
    core::ba_def_def_::parse(&mut st)?;
    core::ba_::parse(&mut st)?;
    // VAL_ legally appears both before SGTYPE_ and after BA_.
    core::val_::parse(&mut st)?;
    core::sig_valtype_::parse(&mut st)?;
    core::sg_mul_val_::parse(&mut st)?;

    st.sc.end_cmd();
    if !st.sc.at_end() {
        return Err(st.fail("DBC"));
    }
    Ok(())
}

/// Reads a `.dbc` file, decoding it as Windows-1252 (the encoding most DBC
/// exporters emit).
pub fn read_dbc_file(path: &str) -> Result<String, DbcFileError> {
    if !path.ends_with(".dbc") {
        return Err(DbcFileError::InvalidExtension { path: path.to_string() });
    }

    let file = File::open(path).map_err(|e| DbcFileError::OpenFile {
        path: path.to_string(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(|e| DbcFileError::Read {
        path: path.to_string(),
        source: e,
    })?;

    let (text, _, _) = WINDOWS_1252.decode(&bytes);
    Ok(text.into_owned())
}
