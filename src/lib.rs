pub mod api;
pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod form;
pub mod notify;
pub mod output;
pub mod progress;
pub mod render;
