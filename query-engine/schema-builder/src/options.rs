use serde::{Deserialize, Serialize};

/// Switches for schema augmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AugmentOptions {
    /// Generate list query fields.
    pub query: bool,
    /// Generate nested inputs and create mutations.
    pub mutation: bool,
    /// Synthesize or normalize the `id` field of every model (local schemas only).
    pub id_fields: bool,
    /// Produce the database side schema: mutations carry native statements
    /// instead of delegating to the binding.
    pub is_for_remote: bool,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            query: true,
            mutation: true,
            id_fields: true,
            is_for_remote: false,
        }
    }
}

impl AugmentOptions {
    pub fn remote() -> Self {
        Self {
            is_for_remote: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let options: AugmentOptions = serde_json::from_str(r#"{ "isForRemote": true, "idFields": false }"#).unwrap();

        assert_eq!(
            options,
            AugmentOptions {
                query: true,
                mutation: true,
                id_fields: false,
                is_for_remote: true,
            }
        );
    }
}
