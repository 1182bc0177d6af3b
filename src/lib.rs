pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod form;
pub mod logging;
pub mod model;
pub mod ui;
