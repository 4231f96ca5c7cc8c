use crate::Result;
use query_core::IndexConfig;
use serde::{Deserialize, Serialize};

/// Key the binding is stored under on the request context.
pub const DEFAULT_BINDING_KEY: &str = "neo4j";

/// How a binding talks to the database and where resolvers find it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BindingConfig {
    /// Log every statement with its parameters, and every shaped response.
    pub log: bool,
    pub index_config: IndexConfig,
    pub binding_key: String,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            log: false,
            index_config: IndexConfig::default(),
            binding_key: DEFAULT_BINDING_KEY.to_owned(),
        }
    }
}

impl BindingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Switches for [`crate::build_resolvers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverOptions {
    pub query: bool,
    pub mutation: bool,
    pub binding_key: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            query: true,
            mutation: true,
            binding_key: DEFAULT_BINDING_KEY.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_core::IdStrategy;

    #[test]
    fn empty_config_takes_defaults() {
        let config = BindingConfig::from_json("{}").unwrap();

        assert!(!config.log);
        assert!(!config.index_config.is_enabled());
        assert_eq!(config.binding_key, "neo4j");
    }

    #[test]
    fn index_config_names_a_generator() {
        let config = BindingConfig::from_json(r#"{ "log": true, "indexConfig": { "use": "cuid" } }"#).unwrap();

        assert!(config.log);
        assert!(matches!(config.index_config, IndexConfig::Use(IdStrategy::Cuid)));
    }

    #[test]
    fn malformed_config_is_a_configuration_error() {
        let err = BindingConfig::from_json(r#"{ "indexConfig": true }"#).unwrap_err();

        assert!(matches!(err, crate::HandlerError::Configuration(_)));
    }
}
