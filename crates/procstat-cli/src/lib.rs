//! CLI library components for the procedure report tool.

pub mod commands;
pub mod logging;
pub mod render;
pub mod settings;
