//! Infrastructure adapters for decoding, config, and logging.

pub mod codec;
pub mod config;
pub mod logging;
