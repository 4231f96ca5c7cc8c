use graphql_parser::query::ParseError;
use query_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{}", _0)]
    Core(#[from] CoreError),

    #[error("Error parsing GraphQL query: {}", _0)]
    QueryParse(String),

    #[error("{}", _0)]
    QueryConversion(String),

    #[error("{}", _0)]
    Configuration(String),

    #[error("{} not yet supported: {}", feature_name, message)]
    UnsupportedFeature { feature_name: String, message: String },

    #[error("No binding registered under `{}` on the request context.", _0)]
    MissingBinding(String),

    #[error("The binding has no {} field named `{}`.", root, field)]
    MissingCallable { root: String, field: String },
}

impl HandlerError {
    pub fn configuration(message: impl ToString) -> Self {
        Self::Configuration(message.to_string())
    }

    pub fn query_conversion(message: impl ToString) -> Self {
        Self::QueryConversion(message.to_string())
    }

    pub fn unsupported_feature(feature_name: impl Into<String>, message: impl ToString) -> Self {
        Self::UnsupportedFeature {
            feature_name: feature_name.into(),
            message: message.to_string(),
        }
    }

    pub fn missing_callable(root: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingCallable {
            root: root.into(),
            field: field.into(),
        }
    }
}

impl From<ParseError> for HandlerError {
    fn from(e: ParseError) -> Self {
        Self::QueryParse(e.to_string())
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        Self::configuration(format!("Error parsing configuration: {e}"))
    }
}
