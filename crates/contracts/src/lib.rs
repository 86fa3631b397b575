pub mod division;
pub mod domain;
pub mod error;
pub mod list;
