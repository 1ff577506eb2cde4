use std::collections::BTreeMap;

use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

use crate::application::ports::QueryStore;
use crate::domain::errors::{InfrastructureError, InfrastructureResult};

fn browser_error(context: &str, e: JsValue) -> InfrastructureError {
    InfrastructureError::BrowserApi(format!("{}: {:?}", context, e))
}

/// Query string of the current page, rewritten in place with `history.replaceState`
#[derive(Clone, Debug, Default)]
pub struct BrowserQueryStore;

impl BrowserQueryStore {
    pub fn new() -> Self {
        Self
    }

    fn current_params() -> InfrastructureResult<UrlSearchParams> {
        let window = web_sys::window().ok_or_else(|| InfrastructureError::BrowserApi("Window not available".to_string()))?;
        let search = window.location().search().map_err(|e| browser_error("location.search", e))?;
        UrlSearchParams::new_with_str(&search).map_err(|e| browser_error("URLSearchParams", e))
    }

    fn update(&self, apply: impl FnOnce(&UrlSearchParams)) -> InfrastructureResult<()> {
        let window = web_sys::window().ok_or_else(|| InfrastructureError::BrowserApi("Window not available".to_string()))?;
        let params = Self::current_params()?;
        apply(&params);

        let location = window.location();
        let path = location.pathname().map_err(|e| browser_error("location.pathname", e))?;
        let hash = location.hash().map_err(|e| browser_error("location.hash", e))?;
        let query = String::from(params.to_string());
        let url = if query.is_empty() {
            format!("{}{}", path, hash)
        } else {
            format!("{}?{}{}", path, query, hash)
        };

        window
            .history()
            .map_err(|e| browser_error("history", e))?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
            .map_err(|e| browser_error("history.replaceState", e))
    }
}

impl QueryStore for BrowserQueryStore {
    fn get(&self, param: &str) -> Option<String> {
        Self::current_params().ok()?.get(param)
    }

    fn set(&mut self, param: &str, value: &str) -> InfrastructureResult<()> {
        self.update(|params| params.set(param, value))
    }

    fn remove(&mut self, param: &str) -> InfrastructureResult<()> {
        self.update(|params| params.delete(param))
    }
}

/// In-memory query string for pages without a location bar and for tests
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryQueryStore {
    params: BTreeMap<String, String>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(param: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.params.insert(param.to_string(), value.to_string());
        store
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl QueryStore for MemoryQueryStore {
    fn get(&self, param: &str) -> Option<String> {
        self.params.get(param).cloned()
    }

    fn set(&mut self, param: &str, value: &str) -> InfrastructureResult<()> {
        self.params.insert(param.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, param: &str) -> InfrastructureResult<()> {
        self.params.remove(param);
        Ok(())
    }
}
