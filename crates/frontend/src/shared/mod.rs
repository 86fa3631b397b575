pub mod api;
pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod division;
pub mod export;
pub mod filters;
pub mod list_controller;
