//! Core domain entities
//!
//! All ledger entities are defined here. These are pure data structures
//! with validation logic - no I/O.

mod account;
mod session;
mod store;
pub mod transaction;
pub mod result;

pub use account::{Account, AccountRecord};
pub use session::{LoginState, Session, MAX_PIN_ATTEMPTS};
pub use store::AccountStore;
pub use transaction::{
    AmountEntry, Balances, LastTransaction, RejectReason, TransactionAmount, TransactionKind,
};
