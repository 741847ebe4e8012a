//! Status service - account store summaries for operators

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::AccountStore;

/// Builds summaries of the loaded ledger. PINs are never included.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusService;

impl StatusService {
    pub fn new() -> Self {
        Self
    }

    /// Get overall status summary
    pub fn get_status(&self, store: &AccountStore) -> StatusSummary {
        let accounts: Vec<AccountSummary> = store
            .iter()
            .map(|a| AccountSummary {
                account_number: a.account_number(),
                owner_name: a.owner_name().to_string(),
                actual_balance: a.actual_balance(),
                available_balance: a.available_balance(),
            })
            .collect();

        StatusSummary {
            total_accounts: accounts.len() as i64,
            total_actual_balance: accounts.iter().map(|a| a.actual_balance).sum(),
            accounts,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_accounts: i64,
    pub total_actual_balance: Decimal,
    pub accounts: Vec<AccountSummary>,
}

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account_number: u32,
    pub owner_name: String,
    pub actual_balance: Decimal,
    pub available_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountRecord;

    #[test]
    fn test_status_totals() {
        let store = AccountStore::from_records(vec![
            AccountRecord {
                account_number: 1,
                pin: 1111,
                actual_balance: Decimal::new(1050, 2),
                owner_name: "A".to_string(),
            },
            AccountRecord {
                account_number: 2,
                pin: 2222,
                actual_balance: Decimal::new(2000, 2),
                owner_name: "B".to_string(),
            },
        ])
        .unwrap();

        let status = StatusService::new().get_status(&store);
        assert_eq!(status.total_accounts, 2);
        assert_eq!(status.total_actual_balance, Decimal::new(3050, 2));
        assert_eq!(status.accounts[1].owner_name, "B");
    }

    #[test]
    fn test_status_empty_store() {
        let status = StatusService::new().get_status(&AccountStore::new());
        assert_eq!(status.total_accounts, 0);
        assert_eq!(status.total_actual_balance, Decimal::ZERO);
    }
}
