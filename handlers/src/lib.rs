//! # Handlers for dbot framework
//!
//! General-purpose handlers: update logging and the `/start` / `/help` commands.

mod help;
mod logging;

#[cfg(test)]
mod test;

pub use help::{parse_command, HelpHandler, HELP_TEXT};
pub use logging::LoggingHandler;
