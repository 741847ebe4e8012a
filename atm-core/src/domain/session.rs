//! Login session state

use serde::Serialize;

use super::transaction::{LastTransaction, TransactionAmount};

/// Numeric PIN mismatches allowed per login cycle
pub const MAX_PIN_ATTEMPTS: u8 = 3;

/// Where a session is in the login flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    AwaitingAccountNumber,
    AwaitingPin,
    Authenticated,
    LockedOut,
    LoggedOut,
}

/// A single operator's session
///
/// Never persisted. The bound account is held as its number and resolved
/// against the store on every call, so the store keeps sole ownership.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) state: LoginState,
    pub(crate) account_number: Option<u32>,
    pub(crate) entered_pin: Option<u32>,
    pub(crate) failed_pin_attempts: u8,
    pub(crate) pending_amount: Option<TransactionAmount>,
    pub(crate) last_transaction: Option<LastTransaction>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            state: LoginState::AwaitingAccountNumber,
            account_number: None,
            entered_pin: None,
            failed_pin_attempts: 0,
            pending_amount: None,
            last_transaction: None,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    /// Account number resolved during login, if any
    pub fn account_number(&self) -> Option<u32> {
        self.account_number
    }

    pub fn failed_pin_attempts(&self) -> u8 {
        self.failed_pin_attempts
    }

    pub fn remaining_pin_attempts(&self) -> u8 {
        MAX_PIN_ATTEMPTS.saturating_sub(self.failed_pin_attempts)
    }

    /// Amount accepted by the last successful amount entry
    pub fn pending_amount(&self) -> Option<TransactionAmount> {
        self.pending_amount
    }

    pub fn last_transaction(&self) -> Option<&LastTransaction> {
        self.last_transaction.as_ref()
    }

    /// Drop everything bound to the current login
    pub(crate) fn reset(&mut self, state: LoginState) {
        self.state = state;
        self.account_number = None;
        self.entered_pin = None;
        self.failed_pin_attempts = 0;
        self.pending_amount = None;
        self.last_transaction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_awaits_account_number() {
        let session = Session::new();
        assert_eq!(session.state(), LoginState::AwaitingAccountNumber);
        assert_eq!(session.remaining_pin_attempts(), MAX_PIN_ATTEMPTS);
        assert!(session.account_number().is_none());
        assert!(session.pending_amount().is_none());
    }

    #[test]
    fn test_reset_clears_binding() {
        let mut session = Session::new();
        session.state = LoginState::Authenticated;
        session.account_number = Some(1000000);
        session.entered_pin = Some(1234);
        session.failed_pin_attempts = 2;

        session.reset(LoginState::LockedOut);

        assert_eq!(session.state(), LoginState::LockedOut);
        assert!(session.account_number().is_none());
        assert!(session.entered_pin.is_none());
        assert_eq!(session.failed_pin_attempts(), 0);
    }
}
