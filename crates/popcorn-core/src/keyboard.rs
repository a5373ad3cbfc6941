//! Global key-press listeners with scoped lifetimes.
//!
//! A `KeyBinding` owns exactly one listener on its hub and removes it when
//! dropped, so a listener can never outlive the view that installed it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::trace;

type Action = Arc<dyn Fn() + Send + Sync>;

struct Listener {
    key: String,
    action: Action,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// Process-wide source of key-press events.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    inner: Arc<Mutex<HubInner>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `action` whenever a key matching `key` is pressed, for as long as
    /// the returned binding is alive
    pub fn bind(&self, key: &str, action: impl Fn() + Send + Sync + 'static) -> KeyBinding {
        let id = install(&self.inner, key, Arc::new(action));
        KeyBinding {
            hub: Arc::downgrade(&self.inner),
            id: Some(id),
            key: key.to_string(),
        }
    }

    /// Deliver a key press. Returns how many listeners ran.
    pub fn dispatch(&self, code: &str) -> usize {
        let matching: Vec<Action> = self
            .lock()
            .listeners
            .values()
            .filter(|l| l.key.eq_ignore_ascii_case(code))
            .map(|l| Arc::clone(&l.action))
            .collect();

        trace!("Key '{}' -> {} listener(s)", code, matching.len());
        for action in &matching {
            action();
        }
        matching.len()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

fn install(hub: &Mutex<HubInner>, key: &str, action: Action) -> u64 {
    let mut inner = hub.lock().unwrap_or_else(|e| e.into_inner());
    let id = inner.next_id;
    inner.next_id += 1;
    inner.listeners.insert(id, Listener { key: key.to_string(), action });
    id
}

/// Handle for one installed listener.
pub struct KeyBinding {
    hub: Weak<Mutex<HubInner>>,
    id: Option<u64>,
    key: String,
}

impl KeyBinding {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.hub.strong_count() > 0
    }

    /// Swap the listener for a new key and action. The old listener is
    /// removed before the new one is installed.
    pub fn rebind(&mut self, key: &str, action: impl Fn() + Send + Sync + 'static) {
        self.release();
        if let Some(hub) = self.hub.upgrade() {
            self.id = Some(install(&hub, key, Arc::new(action)));
        }
        self.key = key.to_string();
    }

    pub fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(hub) = self.hub.upgrade() {
            hub.lock()
                .unwrap_or_else(|e| e.into_inner())
                .listeners
                .remove(&id);
        }
    }
}

impl Drop for KeyBinding {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Arc::clone(&count);
        (count, move || {
            handle.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_dispatch_matches_key_case_insensitively() {
        let hub = KeyboardHub::new();
        let (count, action) = counter();
        let _binding = hub.bind("Escape", action);

        assert_eq!(hub.dispatch("escape"), 1);
        assert_eq!(hub.dispatch("ESCAPE"), 1);
        assert_eq!(hub.dispatch("Enter"), 0);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_removes_listener() {
        let hub = KeyboardHub::new();
        let (count, action) = counter();
        {
            let _binding = hub.bind("Enter", action);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch("Enter"), 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rebind_never_leaves_duplicates() {
        let hub = KeyboardHub::new();
        let (first, first_action) = counter();
        let (second, second_action) = counter();

        let mut binding = hub.bind("Escape", first_action);
        binding.rebind("Escape", second_action);
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch("Escape");
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        let (_, third_action) = counter();
        binding.rebind("Enter", third_action);
        assert_eq!(binding.key(), "Enter");
        assert_eq!(hub.dispatch("Escape"), 0);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_action_may_touch_hub_while_dispatching() {
        let hub = KeyboardHub::new();
        let observer = hub.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&seen);
        let _binding = hub.bind("Enter", move || {
            sink.store(observer.listener_count(), Ordering::SeqCst);
        });

        hub.dispatch("Enter");
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_binding_outliving_hub_is_inert() {
        let hub = KeyboardHub::new();
        let (_, action) = counter();
        let mut binding = hub.bind("Escape", action);
        drop(hub);

        assert!(!binding.is_active());
        binding.release();
    }
}
