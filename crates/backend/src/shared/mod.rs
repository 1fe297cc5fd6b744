pub mod config;
pub mod data;
pub mod format;
pub mod geo;
pub mod logger;
