//! Typed event sink driven by the DBC parser.
//!
//! The parser emits one callback per parsed statement. A consumer implements
//! the subset of events it cares about; every method defaults to a no-op, so
//! unimplemented events are silently ignored. Dispatch is synchronous and
//! single-threaded: no event ever observes a consumer mid-update from another
//! event.

use crate::can::codec::{Endianness, Signess};

/// A parsed `SG_` definition (non-multiplexer).
#[derive(Clone, PartialEq, Debug)]
pub struct SignalDef {
    pub name: String,
    /// Multiplex selector value for `m<N>`-tagged signals.
    pub mux_val: Option<u32>,
    pub start_bit: u32,
    pub bit_size: u32,
    pub byte_order: Endianness,
    pub sign: Signess,
    pub factor: f64,
    pub offset: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    /// Receiver node ordinals resolved against the `BU_` table.
    pub receiver_ords: Vec<usize>,
}

/// A parsed `SG_` multiplexer switch (`M`-tagged).
#[derive(Clone, PartialEq, Debug)]
pub struct MuxerDef {
    pub name: String,
    pub start_bit: u32,
    pub bit_size: u32,
    pub byte_order: Endianness,
    pub sign: Signess,
    pub unit: String,
    pub receiver_ords: Vec<usize>,
}

/// A parsed `EV_` environment variable.
#[derive(Clone, PartialEq, Debug)]
pub struct EnvVarDef {
    pub name: String,
    pub ev_type: u32,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub initial: f64,
    pub ev_id: u32,
    pub access_type: String,
    pub access_node_ords: Vec<usize>,
}

/// A parsed `SGTYPE_` signal type definition.
#[derive(Clone, PartialEq, Debug)]
pub struct SigTypeDef {
    pub name: String,
    pub bit_size: u32,
    pub byte_order: Endianness,
    pub sign: Signess,
    pub factor: f64,
    pub offset: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub default_value: f64,
    pub val_table_ord: usize,
}

/// Object class an attribute definition is scoped to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObjectKind {
    Node,
    Message,
    Signal,
    EnvVar,
}

/// An attribute value, typed by the attribute's `BA_DEF_` declaration.
#[derive(Clone, PartialEq, Debug)]
pub enum AttrValue {
    Int(i32),
    Double(f64),
    Str(String),
}

/// What a `BA_` statement attaches its value to.
#[derive(Clone, PartialEq, Debug)]
pub enum BaTarget {
    Global,
    /// Node ordinal from the `BU_` table.
    Node(usize),
    Message(u32),
    Signal { message_id: u32, sig_name: String },
    EnvVar(String),
}

/// Consumer of parser events. Implement the subset you need.
#[allow(unused_variables)]
pub trait DbcInterpreter {
    fn version(&mut self, version: String) {}

    /// `BU_` node list, in declaration order.
    fn bu(&mut self, nodes: Vec<String>) {}

    /// `BO_` message header; signals of this message follow as [`sg`] /
    /// [`sg_mux`] events.
    ///
    /// [`sg`]: DbcInterpreter::sg
    /// [`sg_mux`]: DbcInterpreter::sg_mux
    fn bo(&mut self, message_id: u32, name: String, size: usize, transmitter_ord: usize) {}

    fn sg(&mut self, message_id: u32, sig: SignalDef) {}

    fn sg_mux(&mut self, message_id: u32, mux: MuxerDef) {}

    fn ev(&mut self, ev: EnvVarDef) {}

    fn envvar_data(&mut self, name: String, data_size: u32) {}

    fn sgtype(&mut self, def: SigTypeDef) {}

    fn sgtype_ref(&mut self, message_id: u32, sig_name: String, type_name: String) {}

    fn sig_group(&mut self, message_id: u32, name: String, repetitions: u32, sig_names: Vec<String>) {}

    /// Global `CM_` comment.
    fn cm(&mut self, comment: String) {}

    fn cm_bu(&mut self, node_ord: usize, comment: String) {}

    fn cm_bo(&mut self, message_id: u32, comment: String) {}

    fn cm_sg(&mut self, message_id: u32, sig_name: String, comment: String) {}

    fn cm_ev(&mut self, ev_name: String, comment: String) {}

    /// `BA_DEF_` with `INT` or `HEX` data type.
    fn ba_def_int(&mut self, attr: String, object: Option<ObjectKind>, min: i32, max: i32) {}

    fn ba_def_float(&mut self, attr: String, object: Option<ObjectKind>, min: f64, max: f64) {}

    fn ba_def_string(&mut self, attr: String, object: Option<ObjectKind>) {}

    fn ba_def_enum(&mut self, attr: String, object: Option<ObjectKind>, values: Vec<String>) {}

    fn ba_def_def(&mut self, attr: String, value: AttrValue) {}

    fn ba(&mut self, attr: String, target: BaTarget, value: AttrValue) {}

    fn val_env(&mut self, ev_name: String, descs: Vec<(u32, String)>) {}

    fn val_sg(&mut self, message_id: u32, sig_name: String, descs: Vec<(u32, String)>) {}

    fn val_table(&mut self, name: String, descs: Vec<(u32, String)>) {}

    /// `SIG_VALTYPE_` value-domain tag for one signal.
    fn sig_valtype(&mut self, message_id: u32, sig_name: String, tag: u32) {}

    fn bo_tx_bu(&mut self, message_id: u32, transmitters: Vec<String>) {}

    fn sg_mul_val(
        &mut self,
        message_id: u32,
        muxed_sig: String,
        mux_switch: String,
        ranges: Vec<(u32, u32)>,
    ) {
    }
}
