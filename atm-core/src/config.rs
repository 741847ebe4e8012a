//! Configuration management
//!
//! Settings live in `<atm_dir>/settings.json`; every field is optional:
//! ```json
//! {
//!   "accountsFile": "accounts.txt",
//!   "bankName": "Saint Charles Community Bank",
//!   "branchAddress": "12 Mid Rivers Dr",
//!   "terminalId": "4512"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

/// Environment variable overriding the ledger file location
pub const ACCOUNTS_FILE_ENV: &str = "ATM_ACCOUNTS_FILE";

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";
const DEFAULT_BANK_NAME: &str = "Saint Charles Community Bank";
const DEFAULT_BRANCH_ADDRESS: &str = "12 Mid Rivers Dr";
const DEFAULT_TERMINAL_ID: &str = "4512";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accounts_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    branch_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    terminal_id: Option<String>,
}

/// ATM configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Ledger file, already resolved against the ATM directory
    pub accounts_file: PathBuf,
    pub bank_name: String,
    pub branch_address: String,
    pub terminal_id: String,
}

impl Config {
    /// Defaults for an ATM directory with no settings file
    pub fn defaults(atm_dir: &Path) -> Self {
        Self {
            accounts_file: atm_dir.join(DEFAULT_ACCOUNTS_FILE),
            bank_name: DEFAULT_BANK_NAME.to_string(),
            branch_address: DEFAULT_BRANCH_ADDRESS.to_string(),
            terminal_id: DEFAULT_TERMINAL_ID.to_string(),
        }
    }

    /// Load config from the ATM directory
    ///
    /// The ledger location can be overridden with `ATM_ACCOUNTS_FILE`.
    /// A settings file that exists but cannot be parsed is an error.
    pub fn load(atm_dir: &Path) -> Result<Self> {
        let settings_path = atm_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).map_err(|e| {
                Error::config(format!("{}: {}", settings_path.display(), e))
            })?
        } else {
            SettingsFile::default()
        };

        let mut config = Self::defaults(atm_dir);
        if let Some(path) = raw.accounts_file {
            config.accounts_file = resolve(atm_dir, path);
        }
        if let Some(name) = raw.bank_name {
            config.bank_name = name;
        }
        if let Some(address) = raw.branch_address {
            config.branch_address = address;
        }
        if let Some(id) = raw.terminal_id {
            config.terminal_id = id;
        }

        if let Some(path) = std::env::var_os(ACCOUNTS_FILE_ENV) {
            config.accounts_file = resolve(atm_dir, PathBuf::from(path));
        }

        Ok(config)
    }

    /// Save config to the ATM directory
    pub fn save(&self, atm_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(atm_dir)?;
        let settings = SettingsFile {
            accounts_file: Some(self.accounts_file.clone()),
            bank_name: Some(self.bank_name.clone()),
            branch_address: Some(self.branch_address.clone()),
            terminal_id: Some(self.terminal_id.clone()),
        };
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(atm_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }
}

/// Relative ledger paths are relative to the ATM directory
fn resolve(atm_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        atm_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.bank_name, DEFAULT_BANK_NAME);
        assert_eq!(config.terminal_id, "4512");
        if std::env::var_os(ACCOUNTS_FILE_ENV).is_none() {
            assert_eq!(config.accounts_file, dir.path().join("accounts.txt"));
        }
    }

    #[test]
    fn test_settings_override_defaults() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "bankName": "First Branch", "terminalId": "0007" }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.bank_name, "First Branch");
        assert_eq!(config.terminal_id, "0007");
        assert_eq!(config.branch_address, DEFAULT_BRANCH_ADDRESS);
    }

    #[test]
    fn test_malformed_settings_is_config_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let mut config = Config::defaults(dir.path());
        config.bank_name = "Riverside".to_string();
        config.save(dir.path()).unwrap();

        let reloaded = Config::load(dir.path()).unwrap();
        assert_eq!(reloaded.bank_name, "Riverside");
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = Path::new("/srv/atm");
        assert_eq!(resolve(base, PathBuf::from("ledger.txt")), base.join("ledger.txt"));
        assert_eq!(
            resolve(base, PathBuf::from("/data/ledger.txt")),
            PathBuf::from("/data/ledger.txt")
        );
    }
}
