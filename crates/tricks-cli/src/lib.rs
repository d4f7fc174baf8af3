pub mod config;
pub mod host;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod verify;
