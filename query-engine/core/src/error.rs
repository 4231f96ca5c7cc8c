use crate::connector::ConnectorError;
use sdl_ast::SchemaError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Nested mutations are limited to a depth of {max_depth}.")]
    NestingDepthExceeded { max_depth: usize },

    #[error(
        "Field {field} on model type {model} is not a to-many relation, so you cannot use both create and connect at the same time."
    )]
    RelationArityViolation { field: String, model: String },

    #[error("Unknown model type `{0}`.")]
    UnknownModel(String),

    #[error("Mutation `{0}` is not a generated mutation.")]
    UnknownMutation(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Failed to generate an id: {0}")]
    IdGeneration(String),

    #[error("Error in connector: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Unexpected result shape: {0}")]
    ResultShape(String),
}

// Errors travel to clients as plain messages.
impl Serialize for CoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl CoreError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Errors raised while compiling, before anything reached the database.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self,
            Self::NestingDepthExceeded { .. } | Self::RelationArityViolation { .. } | Self::InvalidArguments(_)
        )
    }
}
