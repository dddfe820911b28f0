//! Mock Expense Tracker API server for testing
//!
//! A minimal HTTP/1.1 server on a random local port that serves the same
//! response shapes as the real service and records every request it sees,
//! so tests can assert on both the request shape and the decoded result.
//!
//! - GET  /accounts/             -> [Account]
//! - POST /accounts/             -> Account (echoes name/balance)
//! - GET  /accountSummary/{id}   -> AccountSummary
//! - POST /login/                -> User (salman / secret)
//! - GET  /income/{id}           -> [Transaction]
//! - GET  /expense/{id}          -> [Transaction]
//! - GET  /expenseTypes/         -> [ExpenseType]
//! - POST /expense/              -> Transaction

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

pub const VALID_USERNAME: &str = "salman";
pub const VALID_PASSWORD: &str = "secret";
pub const VALID_TOKEN: &str = "d7e744a0375b207c62f4664cd791894b05064f01";

/// Mock API server
pub struct MockExpenseServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Failure scenarios
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Answer every request with this status and an error body
    pub status_override: Option<u16>,
    /// Answer every request with 200 and a body that is not JSON
    pub malformed_body: bool,
}

/// A request as received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json_body(&self) -> JsonValue {
        serde_json::from_str(&self.body).unwrap_or(JsonValue::Null)
    }
}

impl MockExpenseServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(Mutex::new(Vec::new()));

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockExpenseServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    log: &Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let _ = stream.set_nonblocking(false);
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, "Bad Request", r#"{"detail": "Invalid request"}"#);
        return;
    };

    if let Ok(mut requests) = log.lock() {
        requests.push(request.clone());
    }

    if let Some(status) = config.status_override {
        send_response(&mut stream, status, "Error", r#"{"detail": "Server error"}"#);
        return;
    }
    if config.malformed_body {
        send_response(&mut stream, 200, "OK", "<html>not json</html>");
        return;
    }

    let (status, body) = route(&request);
    let text = if status < 300 { "OK" } else { "Error" };
    send_response(&mut stream, status, text, &body.to_string());
}

/// Read the request line, headers and a `Content-Length` body
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let mut parts = lines.next()?.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let body_end = (header_end + content_length).min(data.len());
    let body = String::from_utf8_lossy(&data[header_end..body_end]).to_string();

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn route(request: &RecordedRequest) -> (u16, JsonValue) {
    let path = request.path.split('?').next().unwrap_or(&request.path);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    if request.method == "POST" && path == "/login/" {
        return login(&request.json_body());
    }

    let authorized = request
        .header("authorization")
        .map(|v| v == format!("Token {}", VALID_TOKEN))
        .unwrap_or(false);
    if !authorized {
        return (
            401,
            json!({"detail": "Authentication credentials were not provided."}),
        );
    }

    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["accounts"]) => (
            200,
            json!([
                {"id": 1, "name": "Askari Bank", "balance": 30000},
                {"id": 2, "name": "SCB", "balance": 46000}
            ]),
        ),
        ("POST", ["accounts"]) => {
            let body = request.json_body();
            (
                201,
                json!({"id": 3, "name": body["name"], "balance": body["balance"]}),
            )
        }
        ("GET", ["accountSummary", id]) => match id.parse::<i64>() {
            Ok(id) => (200, summary(id)),
            Err(_) => (404, json!({"detail": "Not found."})),
        },
        ("GET", ["income", _]) => (
            200,
            json!([{"id": 10, "transcation_date": "2022-04-01", "amount": 90000}]),
        ),
        ("GET", ["expense", _]) => (
            200,
            json!([
                {"id": 1, "transcation_date": "2022-04-16", "amount": 200},
                {"id": 2, "transcation_date": "2022-04-17", "amount": 500}
            ]),
        ),
        ("GET", ["expenseTypes"]) => (
            200,
            json!([
                {"id": 1, "title": "Education"},
                {"id": 2, "title": "Groccery"},
                {"id": 3, "title": "Utility"}
            ]),
        ),
        ("POST", ["expense"]) => {
            let body = request.json_body();
            (
                201,
                json!({"id": 99, "transcation_date": "2022-04-18", "amount": body["amount"]}),
            )
        }
        _ => (404, json!({"detail": "Not found."})),
    }
}

fn login(body: &JsonValue) -> (u16, JsonValue) {
    if body["username"] == VALID_USERNAME && body["password"] == VALID_PASSWORD {
        (200, json!({"user_id": 1, "token": VALID_TOKEN}))
    } else {
        (
            400,
            json!({"non_field_errors": ["Unable to log in with provided credentials."]}),
        )
    }
}

fn summary(id: i64) -> JsonValue {
    json!({
        "id": id,
        "title": "Askari Bank",
        "availableBalance": 50000,
        "dailyWithdrawlLimit": null,
        "incomeToday": 10,
        "incomeThisMonth": 100,
        "expensesToday": 2500,
        "expensesThisMonth": 18000,
        "topSpendingCategories": [
            {"categoryTitle": "Education", "expense": 3000},
            {"categoryTitle": "Travel", "expense": 2100}
        ]
    })
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::ExpenseTrackerClient;
    use crate::domain::{NewAccount, NewExpense, TransactionType, User};
    use crate::ports::ExpenseApi;
    use chrono::NaiveDate;

    fn user() -> User {
        User::new(1, VALID_TOKEN)
    }

    fn client_for(server: &MockExpenseServer) -> ExpenseTrackerClient {
        ExpenseTrackerClient::new(&server.base_url()).unwrap()
    }

    #[test]
    fn test_fetch_accounts() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let accounts = client_for(&server).fetch_accounts(&user()).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].name, "SCB");

        let req = server.last_request().unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/accounts/");
        assert_eq!(req.header("Authorization"), Some(format!("Token {}", VALID_TOKEN).as_str()));
    }

    #[test]
    fn test_fetch_account_summary() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let summary = client_for(&server).fetch_account_summary(&user(), 4).unwrap();

        assert_eq!(summary.id, 4);
        assert_eq!(summary.daily_withdrawal_limit, None);
        assert_eq!(summary.top_spending_categories[0].expense, 3000);
        assert_eq!(server.last_request().unwrap().path, "/accountSummary/4");
    }

    #[test]
    fn test_login_sends_credentials_without_token() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let logged_in = client_for(&server)
            .login(VALID_USERNAME, VALID_PASSWORD)
            .unwrap();

        assert_eq!(logged_in, user());

        let req = server.last_request().unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/login/");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.header("authorization").is_none());
        assert_eq!(
            req.json_body(),
            json!({"username": VALID_USERNAME, "password": VALID_PASSWORD})
        );
    }

    #[test]
    fn test_login_bad_credentials_is_transport_error() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let err = client_for(&server).login("salman", "wrong").unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("HTTP 400"));
    }

    #[test]
    fn test_fetch_transactions_by_type() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let expenses = client
            .fetch_transactions(&user(), 2, TransactionType::Expense)
            .unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].date, NaiveDate::from_ymd_opt(2022, 4, 16).unwrap());
        assert_eq!(server.last_request().unwrap().path, "/expense/2");

        let incomes = client
            .fetch_transactions(&user(), 2, TransactionType::Income)
            .unwrap();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].amount, 90000);
        assert_eq!(server.last_request().unwrap().path, "/income/2");
    }

    #[test]
    fn test_create_account_body() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let account = client
            .create_account(&user(), &NewAccount::new("Wallet", 1500))
            .unwrap();
        assert_eq!(account.id, 3);
        assert_eq!(account.name, "Wallet");

        let req = server.last_request().unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.path, "/accounts/");
        assert!(req.header("authorization").is_some());
        assert_eq!(
            req.json_body(),
            json!({"name": "Wallet", "balance": 1500, "owner": 1})
        );

        client
            .create_account(&user(), &NewAccount::new("Card", 0).with_daily_limit(500))
            .unwrap();
        let req = server.last_request().unwrap();
        assert_eq!(req.json_body()["daily_withdrawl_limit"], 500);
    }

    #[test]
    fn test_fetch_expense_types() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let types = client_for(&server).fetch_expense_types(&user()).unwrap();

        assert_eq!(types.len(), 3);
        assert_eq!(types[2].title, "Utility");
        assert_eq!(server.last_request().unwrap().path, "/expenseTypes/");
    }

    #[test]
    fn test_create_expense() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let expense = NewExpense {
            account_id: 2,
            amount: 750,
            expense_type_id: 1,
        };
        let tx = client_for(&server).create_expense(&user(), &expense).unwrap();

        assert_eq!(tx.amount, 750);
        let req = server.last_request().unwrap();
        assert_eq!(req.path, "/expense/");
        assert_eq!(
            req.json_body(),
            json!({"amount": 750, "account": 2, "expense_type": 1})
        );
    }

    #[test]
    fn test_invalid_token_is_transport_error() {
        let server = MockExpenseServer::start(MockConfig::default()).unwrap();
        let err = client_for(&server)
            .fetch_accounts(&User::new(1, "stale"))
            .unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("authentication"));
    }

    #[test]
    fn test_server_error_is_transport_error() {
        let server = MockExpenseServer::start(MockConfig {
            status_override: Some(500),
            ..Default::default()
        })
        .unwrap();
        let err = client_for(&server).fetch_expense_types(&user()).unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let server = MockExpenseServer::start(MockConfig {
            malformed_body: true,
            ..Default::default()
        })
        .unwrap();
        let err = client_for(&server).fetch_accounts(&user()).unwrap_err();

        assert!(err.is_decode());
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ExpenseTrackerClient::new(&format!("http://127.0.0.1:{}/", port)).unwrap();

        let err = client.fetch_accounts(&user()).unwrap_err();
        assert!(err.is_transport());
    }
}
