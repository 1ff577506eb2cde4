use crate::application::ports::QueryStore;
use crate::domain::logging::LogComponent;
use crate::log_warn;
use crate::domain::state::ViewportState;

/// Keeps the zoom query parameter in step with the viewport
pub struct QuerySync<Q: QueryStore> {
    store: Q,
    param: String,
    default_value: String,
}

impl<Q: QueryStore> QuerySync<Q> {
    pub fn new(store: Q, param: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self { store, param: param.into(), default_value: default_value.into() }
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn store(&self) -> &Q {
        &self.store
    }

    /// Raw stored value; the caller decides whether it is a preset or a key
    pub fn restore(&self) -> Option<String> {
        self.store.get(&self.param).filter(|v| !v.is_empty())
    }

    /// Upsert `value`, or drop the parameter when it equals the default
    pub fn persist(&mut self, value: &str) {
        let result = if value == self.default_value {
            self.store.remove(&self.param)
        } else {
            self.store.set(&self.param, value)
        };
        if let Err(e) = result {
            log_warn!(LogComponent::Application("QuerySync"), "⚠️ Failed to persist {}={}: {}", self.param, value, e);
        }
    }

    pub fn persist_state(&mut self, state: &ViewportState) {
        if let Some(value) = state.query_value() {
            self.persist(&value);
        }
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.param) {
            log_warn!(LogComponent::Application("QuerySync"), "⚠️ Failed to clear {}: {}", self.param, e);
        }
    }
}
