use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table.
///
/// Every column is rendered as loggable text by the export pipeline; PII
/// columns are scrubbed downstream by the redacting formatter, not here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub ssn: String,
    pub password: String,
    pub ip: String,
    pub last_login: DateTime<Utc>,
    pub user_agent: String,
}

impl UserRow {
    /// The row as ordered `(column, rendered value)` pairs, in table column
    /// order, for building the export log line.
    pub fn field_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("ssn", self.ssn.clone()),
            ("password", self.password.clone()),
            ("ip", self.ip.clone()),
            ("last_login", self.last_login.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("user_agent", self.user_agent.clone()),
        ]
    }
}
