pub mod cascade;

pub use cascade::{placeholder_options, FilterCascade};
