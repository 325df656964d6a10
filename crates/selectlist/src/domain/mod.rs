//! Core selection types and their errors.

pub mod errors;
pub mod model;
