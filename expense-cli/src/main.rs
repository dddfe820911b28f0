//! Expense Tracker CLI - accounts, income and spending from the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, categories, config, login, logs, new, summary, transactions, Reported};
use expense_core::TransactionType;

/// Expense Tracker - accounts, income and spending from the terminal
#[derive(Parser)]
#[command(name = "et", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the session token
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts and balances
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the summary of one account
    Summary {
        /// Account ID
        account_id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the incomes or expenses of one account
    Transactions {
        /// Account ID
        account_id: i64,
        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        transaction_type: TransactionType,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List expense categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create new records
    New {
        #[command(subcommand)]
        command: new::NewCommands,
    },

    /// Show or change connection settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the local event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.downcast_ref::<Reported>().is_none() {
                output::error(&format!("{:#}", e));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { username, password, json } => login::run(username, password, json),
        Commands::Accounts { json } => accounts::run(json),
        Commands::Summary { account_id, json } => summary::run(account_id, json),
        Commands::Transactions { account_id, transaction_type, json } => {
            transactions::run(account_id, transaction_type, json)
        }
        Commands::Categories { json } => categories::run(json),
        Commands::New { command } => new::run(command),
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
