use thiserror::Error;

#[derive(Debug, Error)]
#[error("{}", kind)]
pub struct ConnectorError {
    pub kind: ErrorKind,
}

impl ConnectorError {
    pub fn from_kind(kind: ErrorKind) -> Self {
        Self { kind }
    }

    pub fn database(code: Option<String>, message: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::Database {
            code,
            message: message.into(),
        })
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::from_kind(ErrorKind::Connection(message.into()))
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("Error opening or closing a session: {0}")]
    Connection(String),

    #[error("Database error{}: {message}", code.as_ref().map(|c| format!(" {c}")).unwrap_or_default())]
    Database { code: Option<String>, message: String },
}
