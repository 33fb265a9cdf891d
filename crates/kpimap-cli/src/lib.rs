//! CLI library components for the KPI mapping studio.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod project;
pub mod summary;
pub mod types;
