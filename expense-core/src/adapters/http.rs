//! Expense Tracker HTTP client
//!
//! Blocking `reqwest` implementation of the [`ExpenseApi`] port. Each call
//! builds one request against the configured base URL, attaches the
//! `Authorization: Token <token>` header when a user is given, and decodes the
//! JSON body into the expected record.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ApiConfig;
use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountSummary, CreateAccountBody, CreateExpenseBody, ExpenseType, NewAccount,
    NewExpense, Transaction, TransactionType, User, UserCredentials,
};
use crate::ports::ExpenseApi;

/// Longest slice of an error response body kept in error messages
const MAX_ERROR_BODY: usize = 200;

/// Parse a base URL and make sure relative endpoints resolve beneath it
///
/// `http://host:8000/api` becomes `http://host:8000/api/` so that joining
/// `accounts/` yields `http://host:8000/api/accounts/`.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| Error::config(format!("Invalid base URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::config(format!("'{}' cannot be used as a base URL", raw)));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Expense Tracker API client
#[derive(Debug, Clone)]
pub struct ExpenseTrackerClient {
    client: Client,
    base_url: Url,
}

impl ExpenseTrackerClient {
    /// Create a client using the HTTP library's default timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client from the `api` section of the settings
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.timeout_secs.map(Duration::from_secs))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL (always ends in `/`)
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("Invalid endpoint '{}': {}", path, e)))
    }

    fn get<T: DeserializeOwned>(&self, path: &str, user: &User) -> Result<T> {
        let url = self.endpoint(path)?;
        let request = self
            .client
            .get(url)
            .header(AUTHORIZATION, user.authorization());
        self.execute(request)
    }

    fn post<B, T>(&self, path: &str, user: Option<&User>, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;

        // Serialization failures surface from `send` as transport errors
        let mut request = self.client.post(url).json(body);
        if let Some(user) = user {
            request = request.header(AUTHORIZATION, user.authorization());
        }
        self.execute(request)
    }

    /// Send the request and decode the body
    ///
    /// The body is read as text first so that a failed read (transport) is
    /// never confused with a malformed payload (decode).
    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().map_err(map_request_error)?;
        let status = response.status();
        let body = response.text().map_err(map_request_error)?;

        check_response_status(status.as_u16(), &body)?;

        serde_json::from_str(&body).map_err(|e| Error::decode_json(&e))
    }
}

impl ExpenseApi for ExpenseTrackerClient {
    fn fetch_accounts(&self, user: &User) -> Result<Vec<Account>> {
        self.get("accounts/", user)
    }

    fn fetch_account_summary(&self, user: &User, account_id: i64) -> Result<AccountSummary> {
        self.get(&format!("accountSummary/{}", account_id), user)
    }

    fn login(&self, username: &str, password: &str) -> Result<User> {
        let credentials = UserCredentials::new(username, password);
        self.post("login/", None, &credentials)
    }

    fn fetch_transactions(
        &self,
        user: &User,
        account_id: i64,
        transaction_type: TransactionType,
    ) -> Result<Vec<Transaction>> {
        self.get(
            &format!("{}{}", transaction_type.endpoint(), account_id),
            user,
        )
    }

    fn create_account(&self, user: &User, account: &NewAccount) -> Result<Account> {
        let body = CreateAccountBody::new(user.user_id, account);
        self.post("accounts/", Some(user), &body)
    }

    fn fetch_expense_types(&self, user: &User) -> Result<Vec<ExpenseType>> {
        self.get("expenseTypes/", user)
    }

    fn create_expense(&self, user: &User, expense: &NewExpense) -> Result<Transaction> {
        let body = CreateExpenseBody::from(expense);
        self.post("expense/", Some(user), &body)
    }
}

/// Map request errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out()
    } else if error.is_connect() {
        Error::unreachable()
    } else {
        Error::transport(error.to_string())
    }
}

/// Non-success statuses are transport failures carrying the status code
///
/// The body of a non-2xx answer is never decoded, so an error page that is
/// not JSON still reports the status rather than a decode failure.
fn check_response_status(status: u16, body: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(Error::status(
            status,
            format!(
                "HTTP {}: authentication failed. Your token may be invalid or expired.",
                status
            ),
        )),
        404 => Err(Error::status(404, "HTTP 404: resource not found")),
        status => {
            let body = body.trim();
            if body.is_empty() {
                Err(Error::status(status, format!("HTTP {}", status)))
            } else {
                let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
                Err(Error::status(status, format!("HTTP {}: {}", status, snippet)))
            }
        }
    }
}
