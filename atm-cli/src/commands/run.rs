//! Run command - the interactive ATM screen
//!
//! Typing QUIT at any prompt (or closing stdin) saves the ledger and exits.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use atm_core::{AccountStore, AmountEntry, AtmContext, Error, Session, TransactionAmount};
use colored::Colorize;

use super::{get_context, GlobalArgs};
use crate::output::{centered, format_currency, separator, SCREEN_WIDTH};
use crate::receipt;

const COMMANDS: &[(&str, &str)] = &[
    ("DEPOSIT", "Deposit money into your account"),
    ("WITHDRAWAL", "Withdraw money from your account"),
    ("BALANCE", "View the current balance of your account"),
    ("LOGOUT", "Logout of the current account"),
    ("QUIT", "Quit and exit the system"),
];

/// One line of operator input
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Quit,
}

/// Operator console: reads lines from `input`, writes screens to `out`
pub struct Console<R, W> {
    input: R,
    out: W,
    /// Read PINs with a hidden terminal prompt instead of from `input`
    hide_secrets: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, hide_secrets: bool) -> Self {
        Self { input, out, hide_secrets }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", format!("* Error: {}", text).red())?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        writeln!(self.out, "{}", prompt)?;
        self.out.flush()?;

        // Undecodable bytes become replacement characters and fail validation
        // at the prompt like any other bad entry.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line).context("Failed to read input")? == 0 {
            return Ok(Input::Quit);
        }
        Ok(classify(&String::from_utf8_lossy(&line)))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Input> {
        if !self.hide_secrets {
            return self.read_line(prompt);
        }
        self.out.flush()?;
        let secret = dialoguer::Password::new()
            .with_prompt(prompt.trim_end().trim_end_matches(':'))
            .allow_empty_password(true)
            .interact()?;
        Ok(classify(&secret))
    }
}

fn classify(raw: &str) -> Input {
    let line = raw.trim();
    if line.eq_ignore_ascii_case("quit") {
        Input::Quit
    } else {
        Input::Line(line.to_string())
    }
}

enum LoginOutcome {
    Authenticated,
    LockedOut,
    Quit,
}

enum CommandOutcome {
    LoggedOut,
    Quit,
}

/// The ATM screen loop over a loaded ledger
pub struct Atm<'a, R, W> {
    ctx: &'a AtmContext,
    store: AccountStore,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Atm<'a, R, W> {
    pub fn new(ctx: &'a AtmContext, store: AccountStore, console: Console<R, W>) -> Self {
        Self { ctx, store, console }
    }

    /// Serve login cycles until the operator quits, then save the ledger once.
    ///
    /// The save also runs when the screen loop fails, so applied transactions
    /// are never dropped; the loop error is returned after the save.
    pub fn run(mut self) -> Result<AccountStore> {
        let served = self.serve_all();
        if let Err(e) = &served {
            tracing::error!(error = %e, "ATM loop stopped, saving ledger");
        }
        let farewell = self.thank_you();

        self.ctx
            .save(&self.store)
            .with_context(|| format!("Failed to save {:?}", self.ctx.config.accounts_file))?;
        served?;
        farewell?;
        Ok(self.store)
    }

    fn serve_all(&mut self) -> Result<()> {
        loop {
            self.login_heading()?;
            let mut session = self.ctx.auth_service.begin_login();

            match self.login(&mut session)? {
                LoginOutcome::Quit => {
                    self.ctx.auth_service.end_session(&mut session);
                    break;
                }
                LoginOutcome::LockedOut => continue,
                LoginOutcome::Authenticated => {}
            }

            match self.serve(&mut session)? {
                CommandOutcome::Quit => {
                    self.ctx.auth_service.end_session(&mut session);
                    break;
                }
                CommandOutcome::LoggedOut => continue,
            }
        }
        Ok(())
    }

    fn login(&mut self, session: &mut Session) -> Result<LoginOutcome> {
        let auth = self.ctx.auth_service;

        loop {
            let input = match self.console.read_line("Please enter your account number: ")? {
                Input::Quit => return Ok(LoginOutcome::Quit),
                Input::Line(line) => line,
            };
            match auth.submit_account_number(&self.store, session, &input) {
                Ok(()) => break,
                Err(Error::Parse(_)) => {
                    self.console.error("You have entered an invalid account number.")?
                }
                Err(Error::NotFound(number)) => self
                    .console
                    .error(&format!("Account # {} does not exist in our system.", number))?,
                Err(e) => return Err(e.into()),
            }
        }

        loop {
            if auth.lockout_pending(session) {
                auth.lock_out(session);
                self.locked_out()?;
                return Ok(LoginOutcome::LockedOut);
            }
            let input = match self.console.read_secret("Please enter your 4 digit pin number: ")? {
                Input::Quit => return Ok(LoginOutcome::Quit),
                Input::Line(line) => line,
            };
            match auth.submit_pin(&self.store, session, &input) {
                Ok(()) => break,
                Err(Error::Parse(_)) => self.console.error("You have entered an invalid pin number.")?,
                Err(Error::AuthMismatch { .. }) => self
                    .console
                    .error("The pin number entered does not match our records.")?,
                Err(Error::LockedOut) => {
                    self.locked_out()?;
                    return Ok(LoginOutcome::LockedOut);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let owner = self
            .store
            .get(session.account_number().unwrap_or_default())
            .map(|a| a.owner_name().to_string())
            .unwrap_or_default();
        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say(&centered(&format!("You are now logged in as {}", owner), SCREEN_WIDTH))?;
        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say("\n\n")?;
        Ok(LoginOutcome::Authenticated)
    }

    fn serve(&mut self, session: &mut Session) -> Result<CommandOutcome> {
        self.command_key()?;

        while self.ctx.auth_service.is_authenticated(&self.store, session) {
            let command = match self.read_command()? {
                Input::Quit => return Ok(CommandOutcome::Quit),
                Input::Line(command) => command,
            };

            let outcome = match command.as_str() {
                "deposit" => self.deposit(session)?,
                "withdrawal" | "withdraw" => self.withdraw(session)?,
                "balance" => {
                    self.balance(session)?;
                    None
                }
                "logout" => {
                    self.thank_you()?;
                    self.ctx.auth_service.logout(session);
                    self.console.say("\n\n")?;
                    Some(CommandOutcome::LoggedOut)
                }
                other => {
                    self.console.error(&format!("{} is not a valid command.", other))?;
                    None
                }
            };
            self.ctx.transaction_service.clear_transaction(session);

            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }

        Ok(CommandOutcome::LoggedOut)
    }

    fn read_command(&mut self) -> Result<Input> {
        loop {
            match self.console.read_line("Please enter the command you wish to perform: ")? {
                Input::Line(line) if line.is_empty() => continue,
                Input::Line(line) => return Ok(Input::Line(line.to_lowercase())),
                Input::Quit => return Ok(Input::Quit),
            }
        }
    }

    /// Prompt until a valid amount is entered. `None` means the operator quit.
    fn read_amount(&mut self, session: &mut Session) -> Result<Option<TransactionAmount>> {
        loop {
            let input = match self
                .console
                .read_line("Please enter the transaction amount (e.g. \"25\"): ")?
            {
                Input::Quit => return Ok(None),
                Input::Line(line) => line,
            };
            match self.ctx.transaction_service.submit_amount(session, &input) {
                AmountEntry::Accepted(amount) => return Ok(Some(amount)),
                AmountEntry::Rejected(reason) => self
                    .console
                    .error(&format!("The transaction amount entered is not valid ({}).", reason))?,
            }
        }
    }

    fn deposit(&mut self, session: &mut Session) -> Result<Option<CommandOutcome>> {
        let amount = match self.read_amount(session)? {
            Some(amount) => amount,
            None => return Ok(Some(CommandOutcome::Quit)),
        };
        match self
            .ctx
            .transaction_service
            .deposit(&mut self.store, session, amount)
        {
            Ok(_) => self.print_receipt(session)?,
            Err(Error::BalanceOverflow { .. }) => self
                .console
                .error("The transaction amount is too large to deposit.")?,
            Err(e) => return Err(e.into()),
        }
        Ok(None)
    }

    fn withdraw(&mut self, session: &mut Session) -> Result<Option<CommandOutcome>> {
        let amount = match self.read_amount(session)? {
            Some(amount) => amount,
            None => return Ok(Some(CommandOutcome::Quit)),
        };
        match self
            .ctx
            .transaction_service
            .withdraw(&mut self.store, session, amount)
        {
            Ok(_) => self.print_receipt(session)?,
            Err(Error::InsufficientFunds { .. }) => self
                .console
                .error("Not enough funds to perform this transaction.")?,
            Err(e) => return Err(e.into()),
        }
        Ok(None)
    }

    fn balance(&mut self, session: &Session) -> Result<()> {
        let balances = self.ctx.transaction_service.current_balances(&self.store, session)?;
        let available = format_currency(balances.available);
        let total = format_currency(balances.actual);
        self.console.say(&format!("Available balance: {:>41}", available))?;
        self.console.say(&format!("Total balance: {:>45}", total))
    }

    fn print_receipt(&mut self, session: &Session) -> Result<()> {
        let (Some(last), Some(account)) = (
            session.last_transaction(),
            session.account_number().and_then(|n| self.store.get(n)),
        ) else {
            return Ok(());
        };
        let text = receipt::render(&self.ctx.config, account, last, receipt::transaction_number());

        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say(&centered("Processing Transaction and Printing Receipt", SCREEN_WIDTH))?;
        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say("\n\n")?;
        self.console.say(&text)?;
        self.console.say("\n\n")?;
        self.command_key()
    }

    fn heading(&mut self) -> Result<()> {
        let welcome = format!("WELCOME TO {} ATM", self.ctx.config.bank_name.to_uppercase());
        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say(&centered(&welcome, SCREEN_WIDTH).bold().to_string())?;
        self.console.say(&separator('=', SCREEN_WIDTH))
    }

    fn login_heading(&mut self) -> Result<()> {
        self.heading()?;
        self.console
            .say(&centered("Login to Continue - Type \"QUIT\" to Quit", SCREEN_WIDTH))?;
        self.console.say(&separator('-', SCREEN_WIDTH))
    }

    fn command_key(&mut self) -> Result<()> {
        self.heading()?;
        self.console.say(&centered("Available Commands List", SCREEN_WIDTH))?;
        self.console.say(&separator('-', SCREEN_WIDTH))?;
        for (command, description) in COMMANDS {
            self.console.say(&format!("{} - {}", command.bold(), description))?;
        }
        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say(&centered("Type any above command to continue", SCREEN_WIDTH))?;
        self.console.say(&separator('=', SCREEN_WIDTH))
    }

    fn locked_out(&mut self) -> Result<()> {
        self.console.error("Too many failed login attempts. Goodbye.")?;
        self.console.say("\n\n")
    }

    fn thank_you(&mut self) -> Result<()> {
        let text = format!("Thank you for choosing {} ATM", self.ctx.config.bank_name);
        self.console.say(&separator('=', SCREEN_WIDTH))?;
        self.console.say(&centered(&text, SCREEN_WIDTH))?;
        self.console.say(&separator('=', SCREEN_WIDTH))
    }
}

pub fn run(args: &GlobalArgs) -> Result<()> {
    let ctx = get_context(args)?;
    let store = ctx
        .load()
        .with_context(|| format!("Failed to load {:?}", ctx.config.accounts_file))?;
    if store.is_empty() {
        crate::output::warning("The ledger has no accounts. Run `atm init` to create sample accounts.");
    }

    let stdin = io::stdin();
    let hide_secrets = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
    let console = Console::new(stdin.lock(), io::stdout(), hide_secrets);

    Atm::new(&ctx, store, console).run()?;
    Ok(())
}
