use crate::HandlerError;
use serde_json::{Map, Value};

#[derive(Debug, serde::Serialize, Default, PartialEq)]
pub struct GQLResponse {
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GQLError>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct GQLError {
    pub message: String,
}

impl GQLError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl GQLResponse {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn insert_error(&mut self, error: impl Into<GQLError>) {
        self.errors.push(error.into());
    }

    pub fn errors(&self) -> impl Iterator<Item = &GQLError> {
        self.errors.iter()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }
}

impl From<HandlerError> for GQLError {
    fn from(err: HandlerError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<HandlerError> for GQLResponse {
    fn from(err: HandlerError) -> Self {
        let mut response = Self::default();
        response.insert_error(err);
        response
    }
}

impl From<crate::Result<Value>> for GQLResponse {
    fn from(result: crate::Result<Value>) -> Self {
        match result {
            Ok(Value::Object(data)) => Self::new(data),
            Ok(Value::Null) => Self::default(),
            Ok(other) => HandlerError::query_conversion(format!("Expected response data to be an object, got {other}.")).into(),
            Err(err) => err.into(),
        }
    }
}
