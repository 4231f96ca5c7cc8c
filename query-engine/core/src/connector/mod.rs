//! The boundary to the graph database. A driver hands out sessions, a session
//! runs statement text with a parameter object and yields records.

mod error;

pub use error::{ConnectorError, ErrorKind};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ConnectorResult<T> = std::result::Result<T, ConnectorError>;

#[async_trait]
pub trait Driver: Send + Sync {
    /// Opens a new session. Every request gets its own.
    async fn session(&self) -> ConnectorResult<Box<dyn Session>>;
}

#[async_trait]
pub trait Session: Send {
    async fn run(&mut self, statement: &str, parameters: &Map<String, Value>) -> ConnectorResult<Vec<Record>>;

    async fn close(&mut self) -> ConnectorResult<()>;
}

/// One result row, as an ordered list of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub columns: Vec<Value>,
}

impl Record {
    pub fn new(columns: Vec<Value>) -> Self {
        Self { columns }
    }

    pub fn into_first_column(self) -> Option<Value> {
        self.columns.into_iter().next()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self::new(vec![value])
    }
}
