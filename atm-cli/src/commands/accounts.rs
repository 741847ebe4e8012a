//! Accounts command - list the accounts in the ledger

use anyhow::{Context, Result};
use colored::Colorize;

use super::{get_context, GlobalArgs};
use crate::output::{create_table, format_currency};

pub fn run(args: &GlobalArgs, json: bool) -> Result<()> {
    let ctx = get_context(args)?;
    let store = ctx
        .load()
        .with_context(|| format!("Failed to load {:?}", ctx.config.accounts_file))?;
    let status = ctx.status_service.get_status(&store);

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Accounts".bold());
    println!("Ledger: {}", ctx.repository.path().display());
    println!();

    if status.accounts.is_empty() {
        println!("No accounts found.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Account #", "Owner", "Balance"]);
    for account in &status.accounts {
        table.add_row(vec![
            account.account_number.to_string(),
            account.owner_name.clone(),
            format_currency(account.actual_balance),
        ]);
    }
    println!("{}", table);
    println!();
    println!(
        "{} account(s), {} on deposit",
        status.total_accounts,
        format_currency(status.total_actual_balance)
    );

    Ok(())
}
