//! Categories command - list expense types

use anyhow::{Context, Result};
use colored::Colorize;

use super::{emit_json, get_context, request, resolve_user, start_command};
use crate::output::create_table;

pub fn run(json: bool) -> Result<()> {
    let logger = start_command("categories");
    let ctx = get_context()?;
    let user = resolve_user(&ctx, &logger)?;

    let result = request(&logger, "expenseTypes/", "Fetching expense types...", || {
        ctx.api.fetch_expense_types(&user)
    });

    if json {
        return emit_json(result);
    }

    let types = result.context("Error occurred fetching expense types")?;

    println!("{}", "Expense Categories".bold());

    let mut table = create_table();
    table.set_header(vec!["ID", "Title"]);
    for expense_type in &types {
        table.add_row(vec![expense_type.id.to_string(), expense_type.title.clone()]);
    }
    println!("{}", table);

    Ok(())
}
