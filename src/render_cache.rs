use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Cache of fully rendered article pages keyed by article id. Mutations to
/// the store must invalidate the matching entry, otherwise the reader keeps
/// seeing the pre-edit page.
pub struct RenderCache {
    entries: Option<RwLock<HashMap<String, Arc<String>>>>,
}

impl RenderCache {
    pub fn new(enabled: bool) -> RenderCache {
        RenderCache {
            entries: enabled.then(|| RwLock::new(HashMap::new())),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<String>> {
        let entries = self.entries.as_ref()?;
        let entries = entries.read().unwrap();
        entries.get(id).cloned()
    }

    pub fn put(&self, id: &str, rendered: String) -> Arc<String> {
        let rendered = Arc::new(rendered);
        if let Some(ref entries) = self.entries {
            let mut entries = entries.write().unwrap();
            entries.insert(id.to_string(), rendered.clone());
        }
        rendered
    }

    pub fn invalidate(&self, id: &str) {
        if let Some(ref entries) = self.entries {
            let mut entries = entries.write().unwrap();
            entries.remove(id);
        }
    }
}
