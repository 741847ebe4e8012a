//! Transaction service - amount entry, deposits and withdrawals

use tracing::{debug, info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountStore, AmountEntry, Balances, LastTransaction, LoginState, Session,
    TransactionAmount, TransactionKind,
};

/// Applies validated amounts to the account bound to an authenticated session
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate an entered amount and remember it as the pending amount.
    ///
    /// A rejected entry clears any previously pending amount.
    pub fn submit_amount(&self, session: &mut Session, input: &str) -> AmountEntry {
        let entry = TransactionAmount::parse(input);
        session.pending_amount = entry.accepted();
        if let AmountEntry::Rejected(reason) = entry {
            debug!(%reason, "amount rejected");
        }
        entry
    }

    /// Add funds to the session's account. No limit short of what a balance can hold.
    pub fn deposit(
        &self,
        store: &mut AccountStore,
        session: &mut Session,
        amount: TransactionAmount,
    ) -> Result<LastTransaction> {
        let account = bound_account_mut(store, session)?;
        if let Err(e) = account.deposit(amount.value()) {
            warn!("deposit refused: balance would overflow");
            return Err(e);
        }
        info!("deposit applied");
        Ok(self.record(session, TransactionKind::Deposit, amount))
    }

    /// Remove funds from the session's account if the available balance covers them
    pub fn withdraw(
        &self,
        store: &mut AccountStore,
        session: &mut Session,
        amount: TransactionAmount,
    ) -> Result<LastTransaction> {
        let account = bound_account_mut(store, session)?;
        if let Err(e) = account.withdraw(amount.value()) {
            warn!("withdrawal refused: insufficient available funds");
            return Err(e);
        }
        info!("withdrawal applied");
        Ok(self.record(session, TransactionKind::Withdrawal, amount))
    }

    /// Available and actual balances of the session's account
    pub fn current_balances(&self, store: &AccountStore, session: &Session) -> Result<Balances> {
        let account = bound_account(store, session)?;
        Ok(Balances {
            available: account.available_balance(),
            actual: account.actual_balance(),
        })
    }

    /// Forget the pending amount and last transaction after a command cycle
    pub fn clear_transaction(&self, session: &mut Session) {
        session.pending_amount = None;
        session.last_transaction = None;
    }

    fn record(
        &self,
        session: &mut Session,
        kind: TransactionKind,
        amount: TransactionAmount,
    ) -> LastTransaction {
        let account_number = session.account_number.unwrap_or_default();
        let last = LastTransaction::new(kind, amount, account_number);
        session.last_transaction = Some(last.clone());
        last
    }
}

/// The account an authenticated session is bound to
fn bound_account<'a>(store: &'a AccountStore, session: &Session) -> Result<&'a Account> {
    let account = authenticated_number(session).and_then(|n| store.get(n));
    match (account, session.entered_pin) {
        (Some(account), Some(pin)) if account.pin_matches(pin) => Ok(account),
        _ => Err(Error::NotAuthenticated),
    }
}

fn bound_account_mut<'a>(
    store: &'a mut AccountStore,
    session: &Session,
) -> Result<&'a mut Account> {
    let account = authenticated_number(session).and_then(|n| store.get_mut(n));
    match (account, session.entered_pin) {
        (Some(account), Some(pin)) if account.pin_matches(pin) => Ok(account),
        _ => Err(Error::NotAuthenticated),
    }
}

fn authenticated_number(session: &Session) -> Option<u32> {
    if session.state == LoginState::Authenticated {
        session.account_number
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{AccountRecord, RejectReason};
    use crate::services::AuthService;

    fn logged_in() -> (AccountStore, Session) {
        let store = AccountStore::from_records(vec![AccountRecord {
            account_number: 1000000,
            pin: 1234,
            actual_balance: Decimal::new(10000, 2),
            owner_name: "Jane Doe".to_string(),
        }])
        .unwrap();
        let auth = AuthService::new();
        let mut session = auth.begin_login();
        auth.submit_account_number(&store, &mut session, "1000000").unwrap();
        auth.submit_pin(&store, &mut session, "1234").unwrap();
        (store, session)
    }

    fn amount(value: i64) -> TransactionAmount {
        TransactionAmount::new(Decimal::from(value)).unwrap()
    }

    #[test]
    fn test_submit_amount_sets_and_clears_pending() {
        let (_, mut session) = logged_in();
        let service = TransactionService::new();

        let entry = service.submit_amount(&mut session, "25");
        assert_eq!(entry, AmountEntry::Accepted(amount(25)));
        assert_eq!(session.pending_amount(), Some(amount(25)));

        let entry = service.submit_amount(&mut session, "0");
        assert_eq!(entry, AmountEntry::Rejected(RejectReason::NotPositive));
        assert!(session.pending_amount().is_none());
    }

    #[test]
    fn test_deposit_withdraw_scenario() {
        let (mut store, mut session) = logged_in();
        let service = TransactionService::new();

        let last = service.deposit(&mut store, &mut session, amount(50)).unwrap();
        assert_eq!(last.kind, TransactionKind::Deposit);
        let balances = service.current_balances(&store, &session).unwrap();
        assert_eq!(balances.actual, Decimal::new(15000, 2));
        assert_eq!(balances.available, Decimal::new(10500, 2));

        service.withdraw(&mut store, &mut session, amount(100)).unwrap();
        let balances = service.current_balances(&store, &session).unwrap();
        assert_eq!(balances.actual, Decimal::new(5000, 2));
        assert_eq!(balances.available, Decimal::new(500, 2));

        let err = service.withdraw(&mut store, &mut session, amount(10)).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));
        let after = service.current_balances(&store, &session).unwrap();
        assert_eq!(after, balances);
        // The refused withdrawal is not recorded
        assert_eq!(
            session.last_transaction().map(|t| t.kind),
            Some(TransactionKind::Withdrawal)
        );
        assert_eq!(
            session.last_transaction().map(|t| t.amount),
            Some(Decimal::from(100))
        );
    }

    #[test]
    fn test_transactions_require_login() {
        let (mut store, mut session) = logged_in();
        let service = TransactionService::new();
        AuthService::new().logout(&mut session);

        let err = service.deposit(&mut store, &mut session, amount(5)).unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
        let err = service.current_balances(&store, &session).unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
    }

    #[test]
    fn test_clear_transaction() {
        let (mut store, mut session) = logged_in();
        let service = TransactionService::new();
        service.submit_amount(&mut session, "5");
        service.deposit(&mut store, &mut session, amount(5)).unwrap();
        assert!(session.last_transaction().is_some());

        service.clear_transaction(&mut session);
        assert!(session.last_transaction().is_none());
        assert!(session.pending_amount().is_none());
    }
}
