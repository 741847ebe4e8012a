//! CLI command implementations

pub mod accounts;
pub mod init;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atm_core::config::Config;
use atm_core::AtmContext;

/// Global options shared by every command
pub struct GlobalArgs {
    pub atm_dir: Option<PathBuf>,
    pub accounts: Option<PathBuf>,
}

/// Get the ATM directory from the flag/environment or default
pub fn get_atm_dir(args: &GlobalArgs) -> PathBuf {
    match &args.atm_dir {
        Some(dir) => dir.clone(),
        None => dirs::home_dir()
            .map(|home| home.join(".atm"))
            .unwrap_or_else(|| PathBuf::from(".atm")),
    }
}

/// Build the ATM context, applying the `--accounts` override last
pub fn get_context(args: &GlobalArgs) -> Result<AtmContext> {
    let atm_dir = get_atm_dir(args);
    let mut config = Config::load(&atm_dir)
        .with_context(|| format!("Failed to load settings from {:?}", atm_dir))?;

    if let Some(path) = &args.accounts {
        config.accounts_file = absolute(path)?;
    }

    tracing::debug!(accounts_file = %config.accounts_file.display(), "using ledger");
    Ok(AtmContext::with_config(config))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path))
    }
}
