//! Transaction amounts and the most recent transaction record

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest number of fraction digits an entered amount may carry (cents)
const MAX_AMOUNT_SCALE: u32 = 2;

/// Kind of ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, strictly positive amount with at most two fraction digits
///
/// There is no zero `TransactionAmount`: "no amount entered yet" is modelled
/// as `Option::None` on the session instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TransactionAmount(Decimal);

impl TransactionAmount {
    /// Validate operator input
    pub fn parse(input: &str) -> AmountEntry {
        let amount = match Decimal::from_str(input.trim()) {
            Ok(amount) => amount,
            Err(_) => return AmountEntry::Rejected(RejectReason::NotANumber),
        };
        match Self::new(amount) {
            Ok(amount) => AmountEntry::Accepted(amount),
            Err(reason) => AmountEntry::Rejected(reason),
        }
    }

    /// Validate an already numeric amount
    pub fn new(amount: Decimal) -> Result<Self, RejectReason> {
        if amount <= Decimal::ZERO {
            return Err(RejectReason::NotPositive);
        }
        if amount.normalize().scale() > MAX_AMOUNT_SCALE {
            return Err(RejectReason::TooPrecise);
        }
        Ok(Self(amount))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for TransactionAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Why an entered amount was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotANumber,
    NotPositive,
    TooPrecise,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RejectReason::NotANumber => "amount is not a number",
            RejectReason::NotPositive => "amount must be greater than zero",
            RejectReason::TooPrecise => "amount cannot have more than two decimal places",
        };
        f.write_str(msg)
    }
}

/// Outcome of submitting an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountEntry {
    Accepted(TransactionAmount),
    Rejected(RejectReason),
}

impl AmountEntry {
    pub fn accepted(&self) -> Option<TransactionAmount> {
        match self {
            AmountEntry::Accepted(amount) => Some(*amount),
            AmountEntry::Rejected(_) => None,
        }
    }
}

/// The single most recent transaction of a session, consumed by receipts
#[derive(Debug, Clone, Serialize)]
pub struct LastTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub account_number: u32,
    pub recorded_at: DateTime<Local>,
}

impl LastTransaction {
    pub fn new(kind: TransactionKind, amount: TransactionAmount, account_number: u32) -> Self {
        Self {
            kind,
            amount: amount.value(),
            account_number,
            recorded_at: Local::now(),
        }
    }
}

/// Available and actual balances of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balances {
    pub available: Decimal,
    pub actual: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_whole_and_cents() {
        assert_eq!(
            TransactionAmount::parse("25").accepted().map(|a| a.value()),
            Some(Decimal::from(25))
        );
        assert_eq!(
            TransactionAmount::parse(" 12.50 ").accepted().map(|a| a.value()),
            Some(Decimal::new(1250, 2))
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            TransactionAmount::parse("twenty"),
            AmountEntry::Rejected(RejectReason::NotANumber)
        );
        assert_eq!(
            TransactionAmount::parse(""),
            AmountEntry::Rejected(RejectReason::NotANumber)
        );
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert_eq!(
            TransactionAmount::parse("0"),
            AmountEntry::Rejected(RejectReason::NotPositive)
        );
        assert_eq!(
            TransactionAmount::parse("0.00"),
            AmountEntry::Rejected(RejectReason::NotPositive)
        );
        assert_eq!(
            TransactionAmount::parse("-5"),
            AmountEntry::Rejected(RejectReason::NotPositive)
        );
    }

    #[test]
    fn test_parse_rejects_fractions_of_a_cent() {
        assert_eq!(
            TransactionAmount::parse("1.005"),
            AmountEntry::Rejected(RejectReason::TooPrecise)
        );
        // Trailing zeros are not extra precision
        assert!(TransactionAmount::parse("1.500").accepted().is_some());
    }

    #[test]
    fn test_amount_display() {
        let amount = TransactionAmount::new(Decimal::from(5)).unwrap();
        assert_eq!(amount.to_string(), "5.00");
        assert_eq!(TransactionKind::Withdrawal.to_string(), "Withdrawal");
    }
}
