pub mod config;
pub mod ports;
pub mod query_sync;
pub mod reload;
pub mod shared_viewport;
pub mod viewport_controller;
pub mod zoom_selector;

pub use config::*;
pub use ports::*;
pub use query_sync::QuerySync;
pub use reload::{ReloadSequencer, ReloadTicket, reload_series};
pub use shared_viewport::SharedViewport;
pub use viewport_controller::ViewportController;
pub use zoom_selector::{SelectorState, ZoomSelector, selector_state};
