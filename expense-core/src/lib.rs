//! Expense Core - client for the Expense Tracker service
//!
//! The remote service owns all business logic; this crate maps typed requests
//! onto its REST endpoints and decodes the answers:
//!
//! - **domain**: Records exchanged with the API (Account, Transaction, etc.)
//! - **ports**: The `ExpenseApi` trait
//! - **adapters**: The reqwest-based HTTP client
//! - **services**: Session, background dispatch and event logging

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::http::ExpenseTrackerClient;
use config::Config;
use ports::ExpenseApi;
use services::{ApiDispatcher, CompletionQueue, SessionService};

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{
    Account, AccountSummary, ExpenseByCategory, ExpenseType, NewAccount, NewExpense, Transaction,
    TransactionType, User,
};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for Expense Tracker operations
///
/// Holds the configuration, the API client and the session. Front ends call
/// the API directly through `api` or hand it to a dispatcher.
pub struct ExpenseContext {
    pub config: Config,
    pub api: Arc<dyn ExpenseApi>,
    pub session: SessionService,
}

impl ExpenseContext {
    /// Create a context from the settings in `app_dir`
    pub fn new(app_dir: &Path) -> Result<Self> {
        let config = Config::load(app_dir)?;
        let client = ExpenseTrackerClient::from_config(&config.api)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create a context around any ExpenseApi implementation
    pub fn with_api(config: Config, api: Arc<dyn ExpenseApi>) -> Self {
        let session = SessionService::new(Arc::clone(&api));
        Self {
            config,
            api,
            session,
        }
    }

    /// A background dispatcher sharing this context's client
    pub fn dispatcher(&self) -> Result<(ApiDispatcher, CompletionQueue)> {
        ApiDispatcher::new(Arc::clone(&self.api))
    }
}
