//! Init command - write a sample ledger to get started

use anyhow::{bail, Result};
use atm_core::{AccountRecord, AccountStore};
use colored::Colorize;
use rust_decimal::Decimal;

use super::{get_context, GlobalArgs};
use crate::output;

/// Accounts written by `atm init`
fn sample_records() -> Vec<AccountRecord> {
    vec![
        AccountRecord {
            account_number: 1000000,
            pin: 1234,
            actual_balance: Decimal::new(10000, 2),
            owner_name: "Jane Doe".to_string(),
        },
        AccountRecord {
            account_number: 1000001,
            pin: 4321,
            actual_balance: Decimal::new(250050, 2),
            owner_name: "John Smith".to_string(),
        },
        AccountRecord {
            account_number: 1000002,
            pin: 1111,
            actual_balance: Decimal::new(0, 2),
            owner_name: "Alex Morgan".to_string(),
        },
    ]
}

pub fn run(args: &GlobalArgs, force: bool) -> Result<()> {
    let ctx = get_context(args)?;
    let path = &ctx.config.accounts_file;

    if path.exists() && !force {
        if !atty::is(atty::Stream::Stdin) {
            bail!("{:?} already exists (use --force to overwrite)", path);
        }
        use dialoguer::Confirm;
        if !Confirm::new()
            .with_prompt(format!("Overwrite existing ledger {:?}?", path))
            .default(false)
            .interact()?
        {
            println!("Cancelled.");
            return Ok(());
        }
        output::warning("Overwriting existing ledger");
    }

    let store = AccountStore::from_records(sample_records())?;
    ctx.save(&store)?;

    output::success(&format!("Wrote {} sample accounts", store.len()));
    println!("  Ledger: {}", path.display().to_string().bold());
    Ok(())
}
