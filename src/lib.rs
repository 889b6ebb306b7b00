pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod loader;
pub mod lookup;
pub mod render;
pub mod server;
pub mod status;
