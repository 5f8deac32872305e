//! Receiving Radar CLI Library
//!
//! Configuration, logging setup and command handling for the `radar-cli`
//! binary.

pub mod cli;
pub mod config;
pub mod logging;

pub use cli::{Cli, CliHandler, Commands, OutputFormat};
pub use config::{load_config, RadarConfig};
pub use logging::initialize_logging_with_config;
