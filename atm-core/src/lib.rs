//! ATM Core - account ledger and authentication engine
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Account, AccountStore, Session, amounts)
//! - **ports**: Trait definitions for external dependencies (LedgerRepository)
//! - **services**: Login state machine, transactions, summaries
//! - **adapters**: Concrete implementations (text file ledger)
//!
//! The free functions at the crate root are the engine surface used by a
//! presentation layer; [`AtmContext`] bundles them with configuration.

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::path::Path;

use anyhow::{Context, Result as AnyResult};

use adapters::text_file::TextFileLedger;
use config::Config;
use ports::LedgerRepository;
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    Account, AccountRecord, AccountStore, AmountEntry, Balances, LastTransaction, LoginState,
    RejectReason, Session, TransactionAmount, TransactionKind, MAX_PIN_ATTEMPTS,
};
pub use domain::result::{Error, Result};

/// Main context for ATM operations
///
/// Holds the configuration, the ledger repository and all services. The
/// account store itself is returned by [`AtmContext::load`] and owned by the
/// caller for the length of the run.
pub struct AtmContext {
    pub config: Config,
    pub repository: TextFileLedger,
    pub auth_service: AuthService,
    pub transaction_service: TransactionService,
    pub status_service: StatusService,
}

impl AtmContext {
    /// Create a new ATM context from the ATM directory
    pub fn new(atm_dir: &Path) -> AnyResult<Self> {
        let config = Config::load(atm_dir)
            .with_context(|| format!("Failed to load settings from {:?}", atm_dir))?;
        Ok(Self::with_config(config))
    }

    /// Create a context from an already built configuration
    pub fn with_config(config: Config) -> Self {
        let repository = TextFileLedger::new(config.accounts_file.clone());
        Self {
            config,
            repository,
            auth_service: AuthService::new(),
            transaction_service: TransactionService::new(),
            status_service: StatusService::new(),
        }
    }

    /// Load the ledger named by the configuration
    pub fn load(&self) -> Result<AccountStore> {
        self.repository.load()
    }

    /// Write the ledger back in full
    pub fn save(&self, store: &AccountStore) -> Result<()> {
        self.repository.save(store)
    }
}

/// Load every account from a ledger file. A missing file yields an empty store.
pub fn load_accounts(path: &Path) -> Result<AccountStore> {
    TextFileLedger::new(path).load()
}

/// Atomically overwrite a ledger file with every account in `store`
pub fn save_accounts(store: &AccountStore, path: &Path) -> Result<()> {
    TextFileLedger::new(path).save(store)
}

/// Start a login cycle
pub fn begin_login() -> Session {
    AuthService::new().begin_login()
}

/// Submit the account number typed at the login prompt
pub fn submit_account_number(store: &AccountStore, session: &mut Session, input: &str) -> Result<()> {
    AuthService::new().submit_account_number(store, session, input)
}

/// Submit a PIN for the account resolved by [`submit_account_number`]
pub fn submit_pin(store: &AccountStore, session: &mut Session, input: &str) -> Result<()> {
    AuthService::new().submit_pin(store, session, input)
}

pub fn is_authenticated(store: &AccountStore, session: &Session) -> bool {
    AuthService::new().is_authenticated(store, session)
}

/// Validate an entered transaction amount
pub fn submit_transaction_amount(session: &mut Session, input: &str) -> AmountEntry {
    TransactionService::new().submit_amount(session, input)
}

pub fn deposit(
    store: &mut AccountStore,
    session: &mut Session,
    amount: TransactionAmount,
) -> Result<LastTransaction> {
    TransactionService::new().deposit(store, session, amount)
}

pub fn withdraw(
    store: &mut AccountStore,
    session: &mut Session,
    amount: TransactionAmount,
) -> Result<LastTransaction> {
    TransactionService::new().withdraw(store, session, amount)
}

pub fn current_balances(store: &AccountStore, session: &Session) -> Result<Balances> {
    TransactionService::new().current_balances(store, session)
}

pub fn logout(session: &mut Session) {
    AuthService::new().logout(session)
}
