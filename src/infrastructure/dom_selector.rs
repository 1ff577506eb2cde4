use std::str::FromStr;

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::application::ports::SelectorHandles;
use crate::domain::errors::{InfrastructureError, InfrastructureResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::zoom::Preset;

const HIDDEN_CLASS: &str = "d-hide";
const ACTIVE_CLASS: &str = "active";

/// Server-rendered preset buttons: `<button data-option="week">` inside a selector root
#[derive(Clone, Debug)]
pub struct DomSelectorHandles {
    root: Element,
}

impl DomSelectorHandles {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn from_id(id: &str) -> InfrastructureResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| InfrastructureError::BrowserApi("Document not available".to_string()))?;
        document
            .get_element_by_id(id)
            .map(Self::new)
            .ok_or_else(|| InfrastructureError::BrowserApi(format!("Selector element '{}' not found", id)))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    fn options(&self) -> Vec<(Preset, Element)> {
        let Ok(nodes) = self.root.query_selector_all("[data-option]") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|el| {
                let preset = Preset::from_str(&el.get_attribute("data-option")?).ok()?;
                Some((preset, el))
            })
            .collect()
    }

    fn toggle(element: &Element, class: &str, on: bool) {
        if let Err(e) = element.class_list().toggle_with_force(class, on) {
            get_logger().warn(
                LogComponent::Infrastructure("DomSelector"),
                &format!("Failed to toggle '{}': {:?}", class, e),
            );
        }
    }
}

impl SelectorHandles for DomSelectorHandles {
    fn set_visible(&mut self, preset: Preset, visible: bool) {
        for (_, element) in self.options().iter().filter(|(p, _)| *p == preset) {
            Self::toggle(element, HIDDEN_CLASS, !visible);
        }
    }

    fn set_active(&mut self, active: Option<Preset>) {
        for (preset, element) in self.options() {
            Self::toggle(&element, ACTIVE_CLASS, Some(preset) == active);
        }
    }

    fn set_selector_visible(&mut self, visible: bool) {
        Self::toggle(&self.root, HIDDEN_CLASS, !visible);
    }
}
