//! Command-line interface module.

mod commands;
mod handlers;

pub use commands::Cli;
pub use handlers::run;
