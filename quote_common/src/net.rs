//! Fixed endpoints, file names and deadline budgets used by client and server.
use std::time::Duration;

/// TCP port the quotation service listens on.
pub const SERVER_PORT: u16 = 8080;
/// Route that serves the current quote.
pub const QUOTATION_PATH: &str = "/cotacao";
/// Third-party pricing API queried by the server.
pub const UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
/// Quotation service URL queried by the client.
pub const SERVICE_URL: &str = "http://localhost:8080/cotacao";

/// SQLite file owned by the server.
pub const DATABASE_PATH: &str = "quote.db";
/// File written by the client.
pub const OUTPUT_PATH: &str = "quotes.txt";

/// Budget for the upstream fetch, measured from call start.
pub const FETCH_BUDGET: Duration = Duration::from_millis(200);
/// Budget for a single row insert.
pub const WRITE_BUDGET: Duration = Duration::from_millis(10);
/// Budget for the client call against the quotation service.
pub const CLIENT_BUDGET: Duration = Duration::from_millis(300);

/// Helper to format a bind address like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
