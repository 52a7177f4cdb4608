//! Infrastructure adapters for filesystem access, config, and logging.

pub mod config;
pub mod fs;
pub mod logging;
