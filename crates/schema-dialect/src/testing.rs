//! In-memory [`Connection`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::traits::Connection;
use crate::core::value::{Row, SqlValue, Statement};
use crate::error::{DialectError, Result};

/// Returns canned responses in order and records every statement.
///
/// Once the canned responses run out every query returns no rows.
#[derive(Default)]
pub(crate) struct MockConnection {
    responses: Mutex<VecDeque<Result<Vec<Row>>>>,
    executed: Mutex<Vec<Statement>>,
    closed: bool,
}

impl MockConnection {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn closed() -> Self {
        Self {
            closed: true,
            ..Self::default()
        }
    }

    /// Queue one response made of the given rows.
    pub(crate) fn with_rows(self, rows: Vec<Vec<SqlValue>>) -> Self {
        self.push(Ok(rows.into_iter().map(Row::new).collect()));
        self
    }

    /// Queue one failing response.
    pub(crate) fn with_error(self, message: &str) -> Self {
        self.push(Err(DialectError::Catalog(message.to_string())));
        self
    }

    fn push(&self, response: Result<Vec<Row>>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
    }

    pub(crate) fn executed(&self) -> Vec<Statement> {
        self.executed.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(Statement::new(sql, args.to_vec()));
        }
        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    fn is_valid(&self) -> bool {
        !self.closed
    }
}

/// Text cell shorthand.
pub(crate) fn text(value: &str) -> SqlValue {
    SqlValue::Text(value.to_string())
}

/// Integer cell shorthand.
pub(crate) fn int(value: i64) -> SqlValue {
    SqlValue::Int(value)
}
