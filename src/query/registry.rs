use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::query::ViewSpec;
use crate::query::controller::QueryController;

struct Entry<T> {
    controller: Arc<QueryController<T>>,
    touched: Instant,
}

/// Per-viewer controllers of one list view, keyed by the session's view key.
pub struct ViewRegistry<T> {
    spec: ViewSpec,
    idle_ttl: Duration,
    views: Mutex<HashMap<String, Entry<T>>>,
}

impl<T: Clone> ViewRegistry<T> {
    pub fn new(spec: ViewSpec, idle_ttl: Duration) -> Self {
        Self {
            spec,
            idle_ttl,
            views: Mutex::new(HashMap::new()),
        }
    }

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    /// Returns the viewer's controller, creating a fresh one on first use.
    ///
    /// Controllers idle for longer than the TTL are dropped on the way.
    pub fn controller(&self, view_key: &str) -> Arc<QueryController<T>> {
        let now = Instant::now();
        let mut views = self.views.lock();

        let ttl = self.idle_ttl;
        let before = views.len();
        views.retain(|key, entry| key == view_key || now.duration_since(entry.touched) < ttl);
        if views.len() < before {
            log::debug!("Pruned {} idle {} views", before - views.len(), self.spec.name);
        }

        let entry = views.entry(view_key.to_string()).or_insert_with(|| Entry {
            controller: Arc::new(QueryController::new(self.spec)),
            touched: now,
        });
        entry.touched = now;
        Arc::clone(&entry.controller)
    }

    /// Drops the viewer's controller; returns whether one existed.
    pub fn discard(&self, view_key: &str) -> bool {
        self.views.lock().remove(view_key).is_some()
    }

    pub fn len(&self) -> usize {
        self.views.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldValue;

    const SPEC: ViewSpec = ViewSpec {
        name: "lawyers",
        list_key: "lawyers",
        page_size: 12,
        sort: None,
        fields: &["q", "city", "specialization"],
    };

    #[test]
    fn same_key_returns_same_controller() {
        let registry = ViewRegistry::<String>::new(SPEC, Duration::from_secs(60));
        let first = registry.controller("alpha");
        first.set_field("city", FieldValue::text("Karachi"));

        let again = registry.controller("alpha");
        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &registry.controller("beta")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn discard_resets_state() {
        let registry = ViewRegistry::<String>::new(SPEC, Duration::from_secs(60));
        registry
            .controller("alpha")
            .set_field("city", FieldValue::text("Karachi"));

        assert!(registry.discard("alpha"));
        assert!(!registry.discard("alpha"));
        let fresh = registry.controller("alpha");
        assert!(fresh.current_fields().iter().all(|(_, value)| value.is_empty()));
    }

    #[test]
    fn idle_views_are_pruned() {
        let registry = ViewRegistry::<String>::new(SPEC, Duration::ZERO);
        registry.controller("alpha");
        registry.controller("beta");
        assert_eq!(registry.len(), 1);
    }
}
