//! Command implementations
//!
//! Every command returns its output instead of printing it.

pub mod modules;
pub mod plan;
pub mod render;
pub mod settings;
