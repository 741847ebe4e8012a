//! Authentication service - account number and PIN login flow
//!
//! ```text
//! AwaitingAccountNumber --number found--> AwaitingPin --pin ok--> Authenticated
//!                                             |                        |
//!                           4th submission after 3 mismatches       logout
//!                                             v                        v
//!                                         LockedOut          AwaitingAccountNumber
//! ```

use tracing::{debug, info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{AccountStore, LoginState, Session, MAX_PIN_ATTEMPTS};

/// Drives a [`Session`] through login, lockout and logout
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        Self
    }

    /// Start a login cycle
    pub fn begin_login(&self) -> Session {
        debug!("login cycle started");
        Session::new()
    }

    /// Resolve the entered account number. Retries are unlimited.
    pub fn submit_account_number(
        &self,
        store: &AccountStore,
        session: &mut Session,
        input: &str,
    ) -> Result<()> {
        if session.state != LoginState::AwaitingAccountNumber {
            return Err(Error::invalid_state(format!(
                "cannot enter an account number while {:?}",
                session.state
            )));
        }

        let account_number = parse_account_number(input)?;
        if !store.contains(account_number) {
            debug!("unknown account number entered");
            return Err(Error::NotFound(account_number));
        }

        session.account_number = Some(account_number);
        session.entered_pin = None;
        session.failed_pin_attempts = 0;
        session.state = LoginState::AwaitingPin;
        debug!("account resolved, awaiting pin");
        Ok(())
    }

    /// Check the entered PIN against the resolved account.
    ///
    /// Non-numeric input is reported but does not count as an attempt. Once
    /// [`MAX_PIN_ATTEMPTS`] numeric mismatches are recorded, the next
    /// submission locks the session out whatever it contains.
    pub fn submit_pin(&self, store: &AccountStore, session: &mut Session, input: &str) -> Result<()> {
        if session.state != LoginState::AwaitingPin {
            return Err(Error::invalid_state(format!(
                "cannot enter a pin while {:?}",
                session.state
            )));
        }

        if self.lockout_pending(session) {
            self.lock_out(session);
            return Err(Error::LockedOut);
        }

        let pin = input
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::parse("You have entered an invalid pin number"))?;

        let account = session
            .account_number
            .and_then(|number| store.get(number))
            .ok_or_else(|| Error::invalid_state("no account resolved for this session"))?;

        session.entered_pin = Some(pin);
        if account.pin_matches(pin) {
            session.state = LoginState::Authenticated;
            info!("login succeeded");
            return Ok(());
        }

        session.failed_pin_attempts += 1;
        warn!(
            failed_attempts = session.failed_pin_attempts,
            "pin mismatch"
        );
        Err(Error::AuthMismatch {
            remaining: session.remaining_pin_attempts(),
        })
    }

    /// True when the next PIN submission will lock the session out
    pub fn lockout_pending(&self, session: &Session) -> bool {
        session.state == LoginState::AwaitingPin && session.failed_pin_attempts >= MAX_PIN_ATTEMPTS
    }

    /// Terminate the login cycle after too many mismatches
    pub fn lock_out(&self, session: &mut Session) {
        warn!("too many failed pin attempts, session locked out");
        session.reset(LoginState::LockedOut);
    }

    /// Bound to an account whose PIN equals the last entered PIN.
    ///
    /// Re-checked against the store on every call.
    pub fn is_authenticated(&self, store: &AccountStore, session: &Session) -> bool {
        if session.state != LoginState::Authenticated {
            return false;
        }
        match (session.account_number.and_then(|n| store.get(n)), session.entered_pin) {
            (Some(account), Some(pin)) => account.pin_matches(pin),
            _ => false,
        }
    }

    /// Clear the bound account and return to the account number prompt
    pub fn logout(&self, session: &mut Session) {
        if session.state == LoginState::Authenticated {
            info!("logged out");
        }
        session.reset(LoginState::AwaitingAccountNumber);
    }

    /// End the session for good (operator quit)
    pub fn end_session(&self, session: &mut Session) {
        session.reset(LoginState::LoggedOut);
    }
}

fn parse_account_number(input: &str) -> Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::parse("You have entered an invalid account number")),
        Ok(number) => Ok(number),
    }
}
