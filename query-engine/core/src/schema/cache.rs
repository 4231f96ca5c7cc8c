use super::{SchemaContext, SchemaContextRef};
use crate::CoreResult;
use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::sync::Arc;

const DEFAULT_CAPACITY: usize = 16;

/// Schema contexts by SHA-256 fingerprint of the schema text, so a schema is only
/// analyzed once no matter how many links are built from it.
pub struct SchemaCache {
    entries: Mutex<LruCache<String, SchemaContextRef>>,
}

impl SchemaCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity.max(1))),
        }
    }

    pub fn get_or_build(&self, type_defs: &str) -> CoreResult<SchemaContextRef> {
        let key = fingerprint(type_defs);

        if let Some(context) = self.entries.lock().get(&key) {
            tracing::trace!(fingerprint = %key, "schema context cache hit");
            return Ok(context.clone());
        }

        // Built outside the lock. Two racing builds of the same schema are harmless.
        let context = Arc::new(SchemaContext::from_type_defs(type_defs)?);
        self.entries.lock().put(key, context.clone());

        Ok(context)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn fingerprint(type_defs: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(type_defs.as_bytes());

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = "type Person @model { id: ID! @unique name: String }";

    #[test]
    fn same_schema_text_is_built_once() {
        let cache = SchemaCache::new(2);

        let first = cache.get_or_build(SDL).unwrap();
        let second = cache.get_or_build(SDL).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn least_recently_used_schema_is_evicted() {
        let cache = SchemaCache::new(1);

        let first = cache.get_or_build(SDL).unwrap();
        cache.get_or_build("type Book @model { title: String }").unwrap();
        let again = cache.get_or_build(SDL).unwrap();

        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
