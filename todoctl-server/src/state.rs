//! Application state shared across handlers

use std::sync::Arc;

use crate::db::TodoStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.inner.store.as_ref()
    }
}
