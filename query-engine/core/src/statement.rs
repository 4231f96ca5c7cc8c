use itertools::Itertools;
use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the parameter carrying the cleaned mutation arguments.
pub const VARIABLES_PARAMETER: &str = "variables";

/// Statement text together with the parameter object it runs with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub text: String,
    pub parameters: Map<String, Value>,
}

impl Statement {
    pub fn new(text: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }

    /// Has the database interpret a read operation directly:
    /// `CALL graphql.query('<operation>', {a: {a}, ...})`.
    pub fn graphql_query(operation: &str, variables: &Map<String, Value>) -> Self {
        let text = format!(
            "CALL graphql.query('{}', {{{}}})",
            quote(operation),
            parameter_map(variables.keys())
        );

        Self::new(text, variables.clone())
    }

    /// Has the database execute a mutation it knows natively:
    /// `CALL graphql.execute('<operation>', {a: {a}, ...})`.
    pub fn graphql_execute(operation: &str, variables: &Map<String, Value>) -> Self {
        let text = format!(
            "CALL graphql.execute('{}', {{{}}})",
            quote(operation),
            parameter_map(variables.keys())
        );

        Self::new(text, variables.clone())
    }
}

/// `a: {a}, b: {b}`: forwards each named parameter under its own name.
pub(crate) fn parameter_map<'k>(keys: impl IntoIterator<Item = &'k String>) -> String {
    keys.into_iter().map(|key| format!("{key}: {{{key}}}")).join(", ")
}

/// Escapes operation text for a single quoted string literal.
fn quote(operation: &str) -> String {
    operation.replace('\\', "\\\\").replace('\'', "\\'")
}
