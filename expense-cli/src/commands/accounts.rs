//! Accounts command - list accounts with their balances

use anyhow::{Context, Result};
use colored::Colorize;

use super::{emit_json, get_context, request, resolve_user, start_command};
use crate::output::{self, align_right, create_table, format_amount};

pub fn run(json: bool) -> Result<()> {
    let logger = start_command("accounts");
    let ctx = get_context()?;
    let user = resolve_user(&ctx, &logger)?;

    let result = request(&logger, "accounts/", "Fetching accounts...", || {
        ctx.api.fetch_accounts(&user)
    });

    if json {
        return emit_json(result);
    }

    let accounts = result.context("Error occurred fetching accounts")?;

    println!("{}", "Accounts".bold());

    if accounts.is_empty() {
        println!();
        output::warning("No accounts yet. Use 'et new account' to add one.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["ID", "Name", "Balance"]);
    for account in &accounts {
        table.add_row(vec![
            account.id.to_string(),
            account.name.clone(),
            format_amount(account.balance),
        ]);
    }
    align_right(&mut table, 2);

    println!("{}", table);

    Ok(())
}
