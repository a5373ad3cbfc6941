use serde::{Deserialize, Serialize};

/// The title whose detail view is open, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    active: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or clear the selection if `id` is already the active one
    pub fn toggle(&mut self, id: &str) {
        if self.is_selected(id) {
            self.active = None;
        } else {
            self.active = Some(id.to_string());
        }
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }
}
