//! Transactions command - dated income or expense list for one account

use anyhow::{Context, Result};
use colored::Colorize;

use expense_core::TransactionType;

use super::{emit_json, get_context, request, resolve_user, start_command};
use crate::output::{self, align_right, create_table, format_amount, format_date};

pub fn run(account_id: i64, transaction_type: TransactionType, json: bool) -> Result<()> {
    let logger = start_command("transactions");
    let ctx = get_context()?;
    let user = resolve_user(&ctx, &logger)?;

    let endpoint = format!("{}{{id}}", transaction_type.endpoint());
    let noun = transaction_type.title().to_lowercase();
    let result = request(&logger, &endpoint, &format!("Fetching {}...", noun), || {
        ctx.api.fetch_transactions(&user, account_id, transaction_type)
    });

    if json {
        return emit_json(result);
    }

    let transactions = result.with_context(|| format!("Error occurred fetching {}", noun))?;

    println!("{}", transaction_type.title().bold());

    if transactions.is_empty() {
        println!();
        output::warning("Nothing recorded yet.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Date", "Amount"]);
    for tx in &transactions {
        table.add_row(vec![format_date(tx.date), format_amount(tx.amount)]);
    }
    align_right(&mut table, 1);

    println!("{}", table);

    let total: i64 = transactions.iter().map(|tx| tx.amount).sum();
    println!("Total: {}", format_amount(total).bold());

    Ok(())
}
