//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Share of a deposit that becomes available immediately (one tenth)
const IMMEDIATE_AVAILABILITY_DIVISOR: i64 = 10;

/// Persisted form of an account, one per line of the ledger file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_number: u32,
    pub pin: u32,
    pub actual_balance: Decimal,
    pub owner_name: String,
}

/// One holder's ledger record
///
/// Balances are only changed through [`Account::apply_balance`], which keeps
/// `available_balance <= actual_balance`.
#[derive(Debug, Clone)]
pub struct Account {
    account_number: u32,
    pin: u32,
    card_number: u32,
    actual_balance: Decimal,
    available_balance: Decimal,
    owner_name: String,
}

impl Account {
    /// Build an account from a loaded record. No hold survives a restart, so
    /// available starts equal to actual.
    pub(crate) fn from_record(record: AccountRecord) -> Self {
        Self {
            account_number: record.account_number,
            pin: record.pin,
            card_number: rand::random::<u32>(),
            actual_balance: record.actual_balance,
            available_balance: record.actual_balance,
            owner_name: record.owner_name,
        }
    }

    pub fn account_number(&self) -> u32 {
        self.account_number
    }

    /// Cosmetic card number shown on receipts
    pub fn card_number(&self) -> u32 {
        self.card_number
    }

    pub fn actual_balance(&self) -> Decimal {
        self.actual_balance
    }

    pub fn available_balance(&self) -> Decimal {
        self.available_balance
    }

    /// Held funds: deposited but not yet available
    pub fn held_balance(&self) -> Decimal {
        self.actual_balance - self.available_balance
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Compare an entered PIN against the one on record
    pub fn pin_matches(&self, entered: u32) -> bool {
        self.pin == entered
    }

    /// Set a new actual balance and recompute the available balance.
    ///
    /// An increase makes only a tenth of the difference available, measured from
    /// the previous *actual* balance. A decrease lowers the previous *available*
    /// balance by the same amount. The asymmetry is observable on statements and
    /// is kept as is.
    pub fn apply_balance(&mut self, new_actual_balance: Decimal) {
        if new_actual_balance > self.actual_balance {
            let increase = new_actual_balance - self.actual_balance;
            self.available_balance =
                self.actual_balance + increase / Decimal::from(IMMEDIATE_AVAILABILITY_DIVISOR);
        } else {
            let decrease = self.actual_balance - new_actual_balance;
            self.available_balance -= decrease;
        }
        self.actual_balance = new_actual_balance;
    }

    /// Add funds. Fails only when the new balance cannot be represented.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        let new_balance = self
            .actual_balance
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow { requested: amount })?;
        self.apply_balance(new_balance);
        Ok(())
    }

    /// Remove funds if the available balance covers them
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if self.available_balance - amount < Decimal::ZERO {
            return Err(Error::InsufficientFunds {
                available: self.available_balance,
                requested: amount,
            });
        }
        let new_balance = self.actual_balance - amount;
        self.apply_balance(new_balance);
        Ok(())
    }

    /// Snapshot for persistence. Holds are not part of the record.
    pub fn to_record(&self) -> AccountRecord {
        AccountRecord {
            account_number: self.account_number,
            pin: self.pin,
            actual_balance: self.actual_balance,
            owner_name: self.owner_name.clone(),
        }
    }
}
