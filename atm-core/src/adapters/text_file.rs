//! Text file ledger implementation
//!
//! One account per line, whitespace-delimited:
//!
//! ```text
//! <accountNumber> <pin> <actualBalance> <ownerName ...>
//! ```
//!
//! The owner name is the trimmed remainder of the line. Balances are written
//! with exactly two fraction digits.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::domain::result::{Error, Result};
use crate::domain::{AccountRecord, AccountStore};
use crate::ports::LedgerRepository;

/// Largest number of fraction digits a stored balance may carry
const MAX_BALANCE_SCALE: u32 = 2;

/// Ledger stored as a plain text file
#[derive(Debug, Clone)]
pub struct TextFileLedger {
    path: PathBuf,
}

impl TextFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in, so the final rename stays
    /// on one filesystem
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl LedgerRepository for TextFileLedger {
    fn load(&self) -> Result<AccountStore> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no ledger file, starting with no accounts");
                return Ok(AccountStore::new());
            }
            Err(e) => {
                return Err(Error::storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let store = parse_ledger(&content)?;
        info!(path = %self.path.display(), accounts = store.len(), "ledger loaded");
        Ok(store)
    }

    fn save(&self, store: &AccountStore) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::storage(format!("failed to create {}: {}", dir.display(), e))
        })?;

        let content = format_ledger(store);

        let mut temp = NamedTempFile::new_in(&dir)
            .map_err(|e| Error::storage(format!("failed to create temp file: {}", e)))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| Error::storage(format!("failed to write ledger: {}", e)))?;
        temp.persist(&self.path).map_err(|e| {
            Error::storage(format!("failed to replace {}: {}", self.path.display(), e.error))
        })?;

        info!(path = %self.path.display(), accounts = store.len(), "ledger saved");
        Ok(())
    }
}

/// Parse a whole ledger. Any malformed line fails the entire load.
pub fn parse_ledger(content: &str) -> Result<AccountStore> {
    let mut store = AccountStore::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = i + 1;
        let record = parse_record(line)
            .map_err(|msg| Error::storage(format!("line {}: {}", line_no, msg)))?;
        store
            .insert(record)
            .map_err(|e| Error::storage(format!("line {}: {}", line_no, e)))?;
    }
    debug!(accounts = store.len(), "parsed ledger");
    Ok(store)
}

/// Serialize every account in store order, one line each
pub fn format_ledger(store: &AccountStore) -> String {
    let mut out = String::new();
    for record in store.records() {
        out.push_str(&format_record(&record));
        out.push('\n');
    }
    out
}

/// Parse one record line
pub fn parse_record(line: &str) -> std::result::Result<AccountRecord, String> {
    let (number, rest) = split_field(line).ok_or("missing account number")?;
    let (pin, rest) = split_field(rest).ok_or("missing pin")?;
    let (balance, rest) = split_field(rest).ok_or("missing balance")?;

    let account_number = number
        .parse::<u32>()
        .map_err(|_| format!("invalid account number '{}'", number))?;
    if account_number == 0 {
        return Err("account number must be positive".to_string());
    }
    let pin = pin
        .parse::<u32>()
        .map_err(|_| format!("invalid pin for account {}", account_number))?;
    let actual_balance = Decimal::from_str(balance)
        .map_err(|_| format!("invalid balance '{}'", balance))?;
    if actual_balance < Decimal::ZERO {
        return Err(format!("negative balance '{}'", balance));
    }
    if actual_balance.normalize().scale() > MAX_BALANCE_SCALE {
        return Err(format!("balance '{}' has more than two decimal places", balance));
    }

    Ok(AccountRecord {
        account_number,
        pin,
        actual_balance,
        owner_name: rest.trim().to_string(),
    })
}

/// Format one record line (without the trailing newline)
pub fn format_record(record: &AccountRecord) -> String {
    let line = format!(
        "{} {} {:.2} {}",
        record.account_number, record.pin, record.actual_balance, record.owner_name
    );
    line.trim_end().to_string()
}

/// Split off the next whitespace-delimited field
fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_record() {
        let record = parse_record("1000000 1234 100.00 Jane  Q. Doe  ").unwrap();
        assert_eq!(record.account_number, 1000000);
        assert_eq!(record.pin, 1234);
        assert_eq!(record.actual_balance, Decimal::new(10000, 2));
        assert_eq!(record.owner_name, "Jane  Q. Doe");
    }

    #[test]
    fn test_parse_record_without_name() {
        let record = parse_record("5 1 0.00").unwrap();
        assert_eq!(record.owner_name, "");
    }

    #[test]
    fn test_parse_record_errors() {
        assert!(parse_record("abc 1234 10.00 Name").is_err());
        assert!(parse_record("1000000 12x4 10.00 Name").is_err());
        assert!(parse_record("1000000 1234 ten Name").is_err());
        assert!(parse_record("1000000 1234").is_err());
        assert!(parse_record("1000000 1234 -1.00 Name").is_err());
        assert!(parse_record("1000000 1234 1.001 Name").is_err());
        assert!(parse_record("0 1234 1.00 Name").is_err());
    }

    #[test]
    fn test_format_record_two_fraction_digits() {
        let record = AccountRecord {
            account_number: 42,
            pin: 7,
            actual_balance: Decimal::from(150),
            owner_name: "John Smith".to_string(),
        };
        assert_eq!(format_record(&record), "42 7 150.00 John Smith");
    }

    #[test]
    fn test_parse_ledger_skips_blank_lines() {
        let store = parse_ledger("1 1111 1.00 A\n\n2 2222 2.00 B\n").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_parse_ledger_reports_line() {
        let err = parse_ledger("1 1111 1.00 A\n2 2222 oops B\n").unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_ledger_duplicate_is_fatal() {
        let err = parse_ledger("1 1111 1.00 A\n1 2222 2.00 B\n").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let ledger = TextFileLedger::new(dir.path().join("accounts.txt"));
        let store = ledger.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_creates_parent_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("accounts.txt");
        let ledger = TextFileLedger::new(&path);

        let store = parse_ledger("1 1111 1.00 A\n2 2222 2.50 B\n").unwrap();
        ledger.save(&store).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1 1111 1.00 A\n2 2222 2.50 B\n"
        );

        let smaller = parse_ledger("3 3333 3.00 C\n").unwrap();
        ledger.save(&smaller).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "3 3333 3.00 C\n");
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let ledger = TextFileLedger::new(dir.path().join("accounts.txt"));
        ledger.save(&parse_ledger("1 1111 1.00 A\n").unwrap()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
