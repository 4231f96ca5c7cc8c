use graphql_parser::schema::ParseError;
use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while reading or augmenting type definitions. All of them are
/// fatal: they point at a schema that cannot be augmented as written.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Error parsing type definitions: {}", _0)]
    Parse(String),

    #[error("id field on type {model} has invalid format '{found}' Required format: 'id: ID!'")]
    InvalidIdField { model: String, found: String },

    #[error("Model type {name} is defined more than once.")]
    DuplicateModel { name: String },
}

impl From<ParseError> for SchemaError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e.to_string())
    }
}
