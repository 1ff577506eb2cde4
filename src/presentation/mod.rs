pub mod wasm_api;
pub mod zoom_selector_view;

pub use wasm_api::ZoomViewport;
pub use zoom_selector_view::{LeptosSelectorHandles, ZoomSelectorBar};
