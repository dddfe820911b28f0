//! CLI command implementations

pub mod accounts;
pub mod categories;
pub mod config;
pub mod login;
pub mod logs;
pub mod new;
pub mod summary;
pub mod transactions;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use expense_core::{EntryPoint, ExpenseContext, LogEvent, LoggingService, OperationResult, User};

/// Token of an existing session, skips the login prompt
pub const TOKEN_ENV: &str = "EXPENSE_TRACKER_TOKEN";
/// User id belonging to `EXPENSE_TRACKER_TOKEN`
pub const USER_ID_ENV: &str = "EXPENSE_TRACKER_USER_ID";

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let app_dir = get_app_dir();
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the app directory from environment or default
pub fn get_app_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("EXPENSE_TRACKER_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".expense-tracker")
    }
}

/// Load settings and build the API client
pub fn get_context() -> Result<ExpenseContext> {
    let app_dir = get_app_dir();
    ExpenseContext::new(&app_dir).context("Failed to initialize expense tracker context")
}

/// Record that a command ran and hand back the logger for request events
pub fn start_command(command: &str) -> Option<LoggingService> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new("command_executed").with_command(command));
    logger
}

/// Run one API request behind a spinner and log its outcome
///
/// `endpoint` is the path template (no ids) so the log stays free of data.
pub fn request<T>(
    logger: &Option<LoggingService>,
    endpoint: &str,
    message: &str,
    call: impl FnOnce() -> expense_core::Result<T>,
) -> expense_core::Result<T> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = call();

    spinner.finish_and_clear();
    log_event(logger, LogEvent::request(endpoint, &result));
    result
}

/// Resolve the user for this command
///
/// Uses `EXPENSE_TRACKER_TOKEN`/`EXPENSE_TRACKER_USER_ID` when set, otherwise
/// prompts for credentials and logs in for the duration of the command.
pub fn resolve_user(ctx: &ExpenseContext, logger: &Option<LoggingService>) -> Result<User> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        let user_id = std::env::var(USER_ID_ENV)
            .with_context(|| format!("{} must be set alongside {}", USER_ID_ENV, TOKEN_ENV))?
            .trim()
            .parse::<i64>()
            .with_context(|| format!("{} must be an integer", USER_ID_ENV))?;
        ctx.session.set_user(User::new(user_id, token));
    } else {
        let (username, password) = prompt_credentials(None, None)?;
        request(logger, "login/", "Signing in...", || {
            ctx.session.login(&username, &password)
        })
        .context("Sign in failed")?;
    }

    Ok(ctx.session.require_user()?)
}

/// Ask for whatever part of the credentials was not given
pub fn prompt_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };
    Ok((username, password))
}

/// Failure already printed as a JSON envelope
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request failed")
    }
}

impl std::error::Error for Reported {}

/// Print a request outcome as an `OperationResult` envelope
pub fn emit_json<T: Serialize>(result: expense_core::Result<T>) -> Result<()> {
    let failed = result.is_err();
    let envelope = OperationResult::from(result);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if failed {
        return Err(Reported.into());
    }
    Ok(())
}
