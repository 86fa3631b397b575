//! Named re-fetch hooks so a mutating screen can ask a sibling list to
//! reload without prop-drilling. The registry is a context-provided
//! handle, not an ambient global; registration is tied to view lifetime.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use leptos::prelude::*;

type RefreshHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone, Default)]
pub struct RefreshRegistry {
    hooks: Arc<RwLock<HashMap<String, RefreshHook>>>,
}

impl RefreshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the re-fetch hook for a key. At most one hook per key:
    /// registering again overwrites the previous one.
    pub fn register(&self, key: &str, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut hooks) = self.hooks.write() {
            hooks.insert(key.to_string(), Arc::new(hook));
        }
    }

    /// Drop the hook on unmount, else a stale closure keeps firing
    /// against a view that no longer exists.
    pub fn unregister(&self, key: &str) {
        if let Ok(mut hooks) = self.hooks.write() {
            hooks.remove(key);
        }
    }

    /// Invoke the hook for a key. An unregistered key is a silent no-op —
    /// refreshing an unmounted screen must never throw.
    pub fn refresh(&self, key: &str) {
        let hook = self
            .hooks
            .read()
            .ok()
            .and_then(|hooks| hooks.get(key).cloned());
        if let Some(hook) = hook {
            hook();
        }
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.hooks
            .read()
            .map(|hooks| hooks.contains_key(key))
            .unwrap_or(false)
    }
}

pub fn provide_refresh_registry() {
    provide_context(RefreshRegistry::new());
}

pub fn use_refresh_registry() -> RefreshRegistry {
    use_context::<RefreshRegistry>().expect("RefreshRegistry not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_refresh_of_absent_key_is_a_noop() {
        let registry = RefreshRegistry::new();
        // Must not panic.
        registry.refresh("purchaseOrders");
        assert!(!registry.is_registered("purchaseOrders"));
    }

    #[test]
    fn test_register_overwrites_and_unregister_removes() {
        let registry = RefreshRegistry::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        registry.register("damagedGoods", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = second.clone();
        registry.register("damagedGoods", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        registry.refresh("damagedGoods");
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        registry.unregister("damagedGoods");
        registry.refresh("damagedGoods");
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
