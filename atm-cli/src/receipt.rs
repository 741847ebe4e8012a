//! Transaction receipt layout

use atm_core::config::Config;
use atm_core::{Account, LastTransaction};
use rand::Rng;

use crate::output::{centered, format_currency, separator, RECEIPT_WIDTH};

const CUSTOMER_SERVICE: &str = "Thank you for using our ATM.\n\
For questions, call 1-800-869-3557\n\
Business customers call 1-800-255-5935";

/// Random reference number printed on the receipt
pub fn transaction_number() -> u32 {
    rand::thread_rng().gen_range(0..=i32::MAX as u32)
}

/// Render a receipt for the account's most recent transaction
pub fn render(config: &Config, account: &Account, last: &LastTransaction, reference: u32) -> String {
    let mut lines = Vec::new();

    lines.push(separator('*', RECEIPT_WIDTH));
    lines.push(centered("ATM TRANSACTION RECEIPT", RECEIPT_WIDTH));
    lines.push(separator('*', RECEIPT_WIDTH));
    lines.push(String::new());

    lines.push(row("Date:", &last.recorded_at.format("%m/%d/%Y").to_string()));
    lines.push(row("Time:", &last.recorded_at.format("%I:%M%p").to_string()));
    lines.push(row("Location:", &config.branch_address));
    lines.push(row("ATM:", &config.terminal_id));
    lines.push(String::new());

    lines.push(row("Customer Card:", &account.card_number().to_string()));
    lines.push(row("Transaction #:", &reference.to_string()));
    lines.push(row("Transaction:", &format!("Checking {}", last.kind)));
    lines.push(row("Amount:", &format_currency(last.amount)));
    lines.push(row("From Account #:", &last.account_number.to_string()));
    lines.push(row("Available Balance:", &format_currency(account.available_balance())));
    lines.push(row("Total Balance:", &format_currency(account.actual_balance())));
    lines.push(String::new());

    lines.push(CUSTOMER_SERVICE.to_string());
    lines.push(String::new());
    lines.push(separator('*', RECEIPT_WIDTH));
    lines.push(String::new());
    lines.push(centered(&config.bank_name, RECEIPT_WIDTH));
    lines.push(centered("N.A. Member FDIC", RECEIPT_WIDTH));

    lines.join("\n")
}

/// Label on the left, value right-aligned to the receipt edge
fn row(label: &str, value: &str) -> String {
    let width = RECEIPT_WIDTH.saturating_sub(label.len() + 1);
    format!("{} {:>width$}", label, value, width = width)
}
