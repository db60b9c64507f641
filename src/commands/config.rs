//! Config subcommands handler

use anyhow::Result;

use playdeck::config::config_path;
use playdeck::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.to_toml()?);
    Ok(())
}

/// Print the configuration file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}
