//! Summary command - balance, income and spending overview for one account

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::{emit_json, get_context, request, resolve_user, start_command};
use crate::output::{align_right, create_table, format_amount, format_limit};

pub fn run(account_id: i64, json: bool) -> Result<()> {
    let logger = start_command("summary");
    let ctx = get_context()?;
    let user = resolve_user(&ctx, &logger)?;

    let result = request(
        &logger,
        "accountSummary/{id}",
        "Fetching account summary...",
        || ctx.api.fetch_account_summary(&user, account_id),
    );

    if json {
        return emit_json(result);
    }

    let summary = result.context("Error occurred fetching summary")?;

    println!("{}", summary.title.bold());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        "Available Balance".to_string(),
        format_amount(summary.available_balance),
    ]);
    table.add_row(vec![
        "Daily Spending Limit".to_string(),
        format_limit(summary.daily_withdrawal_limit),
    ]);
    println!("{}", table);
    println!();

    println!("{}", "Income Summary".bold());
    println!("  Income Today:       {}", format_amount(summary.income_today));
    println!("  Income This Month:  {}", format_amount(summary.income_this_month));
    println!();

    println!("{}", "Expense Summary".bold());
    println!("  Spendings Today:      {}", format_amount(summary.expenses_today));
    println!("  Spendings This Month: {}", format_amount(summary.expenses_this_month));
    println!();

    println!("{}", "Top Spending Categories".bold());
    if summary.top_spending_categories.is_empty() {
        println!("  No spending recorded yet.");
    } else {
        let mut categories = create_table();
        categories.set_header(vec!["Category", "Spent"]);
        for category in &summary.top_spending_categories {
            categories.add_row(vec![
                category.category_title.clone(),
                format_amount(category.expense),
            ]);
        }
        align_right(&mut categories, 1);
        println!("{}", categories);
    }

    println!();
    println!(
        "{}",
        format!(
            "See all: et transactions {id} --type income | et transactions {id}",
            id = summary.id
        )
        .dimmed()
    );

    Ok(())
}
