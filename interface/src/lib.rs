pub mod app;
pub mod component_ui;
pub mod config;
pub mod consts;
pub mod snapshot;
pub mod top_bar;
pub mod utils;
