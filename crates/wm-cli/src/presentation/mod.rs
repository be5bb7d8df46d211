//! Shared CLI presentation utilities.
//!
//! Format-only helpers; ledger rules stay in `wm-core`.

pub mod tables;

pub use tables::{
    contract_header, contract_row, print_separator, realization_label, truncate_string,
};
