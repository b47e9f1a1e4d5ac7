//! CLI commands

pub mod generate;
pub mod photo;
pub mod session;
