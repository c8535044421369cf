//! Geoplanner CLI library.
//!
//! Command handlers and output formatting for the `geoplanner-cli` binary.

pub mod commands;
pub mod output;
