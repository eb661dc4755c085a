//! evalboard CLI Library
//!
//! This library provides the core functionality of the evalboard
//! command-line interface: configuration management, benchmark batch
//! submission, commands and output formatting.

pub mod batch;
pub mod commands;
pub mod config;
pub mod interactive;
pub mod output;

pub use batch::{BatchError, BatchReport, BatchSubmitter, FixedDelay, Pacer};
pub use config::Config;
pub use output::{JsonFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
