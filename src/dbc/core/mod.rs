//! One parser per DBC section family, invoked in the fixed section order by
//! [`parse_dbc`](crate::dbc::parse::parse_dbc).

pub(crate) mod attr_value;
pub(crate) mod ba_;
pub(crate) mod ba_def_;
pub(crate) mod ba_def_def_;
pub(crate) mod bo_;
pub(crate) mod bo_tx_bu_;
pub(crate) mod bs_;
pub(crate) mod bu_;
pub(crate) mod cm_;
pub(crate) mod envvar_data_;
pub(crate) mod ev_;
pub(crate) mod ns_;
pub(crate) mod sg_;
pub(crate) mod sg_mul_val_;
pub(crate) mod sgtype_;
pub(crate) mod sig_group_;
pub(crate) mod sig_valtype_;
pub(crate) mod val_;
pub(crate) mod val_table_;
pub(crate) mod version;
