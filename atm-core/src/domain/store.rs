//! In-memory account collection

use std::collections::HashMap;

use super::account::{Account, AccountRecord};
use super::result::{Error, Result};

/// Insertion-ordered set of accounts keyed by account number
///
/// The store owns every account; callers only borrow them.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
    index: HashMap<u32, usize>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, failing on the first duplicate
    pub fn from_records(records: impl IntoIterator<Item = AccountRecord>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Add an account built from a persisted record
    pub fn insert(&mut self, record: AccountRecord) -> Result<()> {
        if self.index.contains_key(&record.account_number) {
            return Err(Error::storage(format!(
                "duplicate account number {}",
                record.account_number
            )));
        }
        self.index.insert(record.account_number, self.accounts.len());
        self.accounts.push(Account::from_record(record));
        Ok(())
    }

    /// Look up an account by number
    pub fn get(&self, account_number: u32) -> Option<&Account> {
        self.index.get(&account_number).map(|&i| &self.accounts[i])
    }

    /// Look up an account by number for mutation
    pub fn get_mut(&mut self, account_number: u32) -> Option<&mut Account> {
        match self.index.get(&account_number) {
            Some(&i) => self.accounts.get_mut(i),
            None => None,
        }
    }

    pub fn contains(&self, account_number: u32) -> bool {
        self.index.contains_key(&account_number)
    }

    /// Accounts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Persistable snapshot of every account, in insertion order
    pub fn records(&self) -> Vec<AccountRecord> {
        self.accounts.iter().map(Account::to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(number: u32, name: &str) -> AccountRecord {
        AccountRecord {
            account_number: number,
            pin: 1111,
            actual_balance: Decimal::new(2500, 2),
            owner_name: name.to_string(),
        }
    }

    #[test]
    fn test_lookup() {
        let store = AccountStore::from_records(vec![record(1, "A"), record(2, "B")]).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(2).unwrap().owner_name(), "B");
        assert!(store.get(3).is_none());
        assert!(store.contains(1));
    }

    #[test]
    fn test_duplicate_account_number_rejected() {
        let err = AccountStore::from_records(vec![record(7, "A"), record(7, "B")]).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let store =
            AccountStore::from_records(vec![record(30, "C"), record(10, "A"), record(20, "B")])
                .unwrap();
        let numbers: Vec<u32> = store.iter().map(|a| a.account_number()).collect();
        assert_eq!(numbers, vec![30, 10, 20]);
    }

    #[test]
    fn test_get_mut_changes_stored_account() {
        let mut store = AccountStore::from_records(vec![record(1, "A")]).unwrap();
        store.get_mut(1).unwrap().deposit(Decimal::from(10)).unwrap();
        assert_eq!(store.get(1).unwrap().actual_balance(), Decimal::new(3500, 2));
        assert!(store.get_mut(99).is_none());
    }
}
