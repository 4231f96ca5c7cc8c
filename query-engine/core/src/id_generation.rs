//! Identifier injection for created nodes.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Source of values for the `id` field of nodes created without one.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> CoreResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    Cuid,
    Uuid,
}

impl IdGenerator for IdStrategy {
    fn generate(&self) -> CoreResult<String> {
        match self {
            Self::Cuid => cuid::cuid1().map_err(|err| CoreError::IdGeneration(err.to_string())),
            Self::Uuid => Ok(uuid::Uuid::new_v4().to_string()),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cuid => f.write_str("cuid"),
            Self::Uuid => f.write_str("uuid"),
        }
    }
}

/// Whether and how ids get injected into create arguments. Written as `false`
/// or `{ "use": "cuid" }` in configuration.
#[derive(Clone, Default)]
pub enum IndexConfig {
    #[default]
    Disabled,
    Use(IdStrategy),
    Custom(Arc<dyn IdGenerator>),
}

impl IndexConfig {
    pub fn custom(generator: impl IdGenerator + 'static) -> Self {
        Self::Custom(Arc::new(generator))
    }

    pub fn generator(&self) -> Option<&dyn IdGenerator> {
        match self {
            Self::Disabled => None,
            Self::Use(strategy) => Some(strategy),
            Self::Custom(generator) => Some(generator.as_ref()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl fmt::Debug for IndexConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Use(strategy) => f.debug_tuple("Use").field(strategy).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndexConfig {
    Flag(bool),
    Strategy {
        #[serde(rename = "use")]
        strategy: IdStrategy,
    },
}

impl<'de> Deserialize<'de> for IndexConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match RawIndexConfig::deserialize(deserializer)? {
            RawIndexConfig::Flag(false) => Ok(Self::Disabled),
            RawIndexConfig::Flag(true) => Err(serde::de::Error::custom(
                "indexConfig must be `false` or name a generator, e.g. { \"use\": \"cuid\" }",
            )),
            RawIndexConfig::Strategy { strategy } => Ok(Self::Use(strategy)),
        }
    }
}

impl Serialize for IndexConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::Use(strategy) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("use", strategy)?;
                map.end()
            }
            Self::Disabled | Self::Custom(_) => serializer.serialize_bool(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_false_as_disabled() {
        let config: IndexConfig = serde_json::from_value(json!(false)).unwrap();
        assert!(!config.is_enabled());
    }

    #[test]
    fn deserializes_generator_name() {
        let config: IndexConfig = serde_json::from_value(json!({ "use": "uuid" })).unwrap();

        assert!(matches!(config, IndexConfig::Use(IdStrategy::Uuid)));
        assert_eq!(config.generator().unwrap().generate().unwrap().len(), 36);
    }

    #[test]
    fn rejects_true_and_unknown_generators() {
        assert!(serde_json::from_value::<IndexConfig>(json!(true)).is_err());
        assert!(serde_json::from_value::<IndexConfig>(json!({ "use": "snowflake" })).is_err());
    }

    #[test]
    fn cuids_are_distinct() {
        let a = IdStrategy::Cuid.generate().unwrap();
        let b = IdStrategy::Cuid.generate().unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with('c'));
    }
}
