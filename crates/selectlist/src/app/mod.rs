//! Application layer built on the selection domain and infrastructure.

pub mod cli;
pub mod render;
