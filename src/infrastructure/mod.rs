pub mod dom_selector;
pub mod http;
pub mod js_widget;
pub mod query_store;
pub mod services;

pub use dom_selector::DomSelectorHandles;
pub use http::ChartSeriesClient;
pub use js_widget::JsChartWidget;
pub use query_store::{BrowserQueryStore, MemoryQueryStore};
pub use services::{BrowserTimeProvider, ConsoleLogger};
