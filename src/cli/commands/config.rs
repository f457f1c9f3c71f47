//! Configuration command.

use crate::config;

use super::effective_config;

/// Print the config path and effective settings, or write defaults
pub fn cmd_config(init: bool, timeout: Option<u64>) -> anyhow::Result<()> {
    if init {
        let path = config::save(&config::Config::default())?;
        println!("✓ Wrote default configuration to {:?}", path);
        return Ok(());
    }

    match config::config_path() {
        Some(path) if path.exists() => println!("Config file: {:?}", path),
        Some(path) => println!("Config file: {:?} (not created, using defaults)", path),
        None => println!("Config file: (no config directory on this platform)"),
    }
    println!();
    print!("{}", toml::to_string_pretty(&effective_config(timeout))?);
    Ok(())
}
