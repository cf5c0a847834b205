//! Core application functionality
//!
//! This module contains the application shell around the font sheets:
//! - CLI parsing and validation
//! - User configuration file and resolved settings
//! - Batch output
//! - Runner and process-level error handling

pub mod batch;
pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::run_app;
pub use settings::Settings;
