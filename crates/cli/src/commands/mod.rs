//! CLI command implementations.

pub mod discuss;
pub mod doctor;
