pub mod categories;
pub mod config;
pub mod download;
pub mod generate;
pub mod render;
pub mod version;
