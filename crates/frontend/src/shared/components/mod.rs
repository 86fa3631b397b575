pub mod data_table;
pub mod error_modal;
pub mod filter_panel;
pub mod pagination_controls;
