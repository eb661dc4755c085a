//! Configuration commands

use anyhow::Result;

use crate::config::Config;
use crate::output::{colors, TableFormatter};

/// Print the effective configuration
pub fn show(config: &Config) -> Result<()> {
    println!("{}", colors::bold("Current configuration:"));
    println!("{}", TableFormatter::key_value(config.display_items()));
    println!(
        "{}",
        colors::dim(&format!("Config file: {}", Config::config_file()?.display()))
    );
    Ok(())
}

/// Print one configuration value
pub fn get(config: &Config, key: &str) -> Result<()> {
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => println!("{}", colors::dim("(not set)")),
    }
    Ok(())
}

/// Set one configuration value and save the file
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save()?;
    println!("{} {} = {}", colors::success("Saved"), key, value);
    Ok(())
}

/// Overwrite the configuration file with defaults
pub fn reset() -> Result<()> {
    Config::default().save()?;
    println!("{}", colors::success("Configuration reset to defaults"));
    Ok(())
}
