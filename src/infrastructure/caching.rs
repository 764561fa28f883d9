use std::{collections::HashMap, sync::RwLock};

use serde_json::Value;
use tracing::debug;

use crate::application::interfaces::page_cache::PageCache;

/// In-process cache of rendered route payloads, keyed by path. Invalidation
/// is by prefix so nested views under a stale list drop together.
#[derive(Debug, Default)]
pub struct InMemoryPageCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryPageCache {
    pub fn get(&self, path: &str) -> Option<Value> {
        self.entries.read().ok()?.get(path).cloned()
    }

    pub fn put(&self, path: &str, payload: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(path.to_string(), payload);
        }
    }
}

impl PageCache for InMemoryPageCache {
    fn invalidate(&self, path_prefix: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|path, _| !path.starts_with(path_prefix));
        }
        debug!(path_prefix, "page_cache: invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalidate_drops_the_prefix_and_everything_under_it() {
        let cache = InMemoryPageCache::default();
        cache.put("/dashboard/invoices", json!(["list"]));
        cache.put("/dashboard/invoices/abc", json!({"id": "abc"}));
        cache.put("/dashboard/customers", json!(["customers"]));

        cache.invalidate("/dashboard/invoices");

        assert!(cache.get("/dashboard/invoices").is_none());
        assert!(cache.get("/dashboard/invoices/abc").is_none());
        assert_eq!(cache.get("/dashboard/customers"), Some(json!(["customers"])));
    }

    #[test]
    fn put_overwrites_previous_payload() {
        let cache = InMemoryPageCache::default();
        cache.put("/dashboard/invoices", json!([1]));
        cache.put("/dashboard/invoices", json!([1, 2]));

        assert_eq!(cache.get("/dashboard/invoices"), Some(json!([1, 2])));
    }
}
