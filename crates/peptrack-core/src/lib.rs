//! Shared building blocks for the peptrack workspace: configuration, core
//! errors, route constants and boundary parsing helpers.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;
