//! Reusable TUI components

pub mod form_field;
pub mod pair_table;
pub mod status_display;

pub use form_field::{render_select_cell, OptionDropdown, TextInput};
pub use pair_table::{PairTable, PairTableConfig};
pub use status_display::{StatusDisplay, StatusMessage, StatusType};
