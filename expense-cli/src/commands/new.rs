//! New command - create accounts and expenses

use anyhow::{Context, Result};
use clap::Subcommand;
use dialoguer::{Input, Select};

use expense_core::{NewAccount, NewExpense};

use super::{emit_json, get_context, request, resolve_user, start_command};
use crate::output::{self, format_amount, format_date, format_limit};

#[derive(Subcommand)]
pub enum NewCommands {
    /// Create an account
    Account {
        /// Account title
        #[arg(long)]
        name: Option<String>,
        /// Starting balance
        #[arg(long, allow_hyphen_values = true)]
        balance: Option<i64>,
        /// Daily spending limit
        #[arg(long)]
        daily_limit: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record an expense against an account
    Expense {
        /// Account ID
        #[arg(long)]
        account_id: Option<i64>,
        /// Amount spent
        #[arg(long)]
        amount: Option<i64>,
        /// Expense type ID (chosen from a list when omitted)
        #[arg(long)]
        category_id: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: NewCommands) -> Result<()> {
    match command {
        NewCommands::Account { name, balance, daily_limit, json } => {
            run_account(name, balance, daily_limit, json)
        }
        NewCommands::Expense { account_id, amount, category_id, json } => {
            run_expense(account_id, amount, category_id, json)
        }
    }
}

fn run_account(
    name: Option<String>,
    balance: Option<i64>,
    daily_limit: Option<i64>,
    json: bool,
) -> Result<()> {
    let logger = start_command("new account");
    let ctx = get_context()?;
    let user = resolve_user(&ctx, &logger)?;

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Account Title").interact_text()?,
    };
    let balance = match balance {
        Some(b) => b,
        None => Input::new()
            .with_prompt("Starting Balance")
            .default(0i64)
            .interact_text()?,
    };

    let mut account = NewAccount::new(name, balance);
    if let Some(limit) = daily_limit {
        account = account.with_daily_limit(limit);
    }

    let result = request(&logger, "accounts/", "Creating account...", || {
        ctx.api.create_account(&user, &account)
    });

    if json {
        return emit_json(result);
    }

    let created = result.context("Error occurred creating account")?;

    output::success("Account created");
    println!("  ID: {}", created.id);
    println!("  Name: {}", created.name);
    println!("  Balance: {}", format_amount(created.balance));
    println!("  Daily Limit: {}", format_limit(account.daily_limit));

    Ok(())
}

fn run_expense(
    account_id: Option<i64>,
    amount: Option<i64>,
    category_id: Option<i64>,
    json: bool,
) -> Result<()> {
    let logger = start_command("new expense");
    let ctx = get_context()?;
    let user = resolve_user(&ctx, &logger)?;

    let account_id = match account_id {
        Some(id) => id,
        None => Input::new().with_prompt("Account ID").interact_text()?,
    };
    let amount = match amount {
        Some(a) => a,
        None => Input::new().with_prompt("Enter Amount").interact_text()?,
    };

    let expense_type_id = match category_id {
        Some(id) => id,
        None => {
            let types = request(&logger, "expenseTypes/", "Fetching expense types...", || {
                ctx.api.fetch_expense_types(&user)
            })
            .context("Error occurred fetching expense types")?;

            if types.is_empty() {
                anyhow::bail!("No expense categories available");
            }

            let titles: Vec<&str> = types.iter().map(|t| t.title.as_str()).collect();
            let choice = Select::new()
                .with_prompt("Select Category")
                .items(&titles)
                .default(0)
                .interact()?;
            types[choice].id
        }
    };

    let expense = NewExpense {
        account_id,
        amount,
        expense_type_id,
    };

    let result = request(&logger, "expense/", "Creating expense...", || {
        ctx.api.create_expense(&user, &expense)
    });

    if json {
        return emit_json(result);
    }

    let created = result.context("Error occurred creating expense")?;

    output::success("Expense created");
    println!("  ID: {}", created.id);
    println!("  Date: {}", format_date(created.date));
    println!("  Amount: {}", format_amount(created.amount));

    Ok(())
}
