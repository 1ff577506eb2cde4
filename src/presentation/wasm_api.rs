use std::rc::Rc;
use std::str::FromStr;

use gloo::utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{SeriesQuery, SharedViewport, ViewportConfig, ViewportController, reload_series};
use crate::domain::events::{Transition, ViewportEvent};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::zoom::{Axis, AxisKind, Extremes, Preset};
use crate::infrastructure::{BrowserQueryStore, ChartSeriesClient, DomSelectorHandles, JsChartWidget};

type PageViewport = SharedViewport<JsChartWidget, BrowserQueryStore, DomSelectorHandles>;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `[start, end]` of the new window, empty when nothing changed
fn window_of(transition: Transition) -> Vec<f64> {
    transition.range().map(|r| vec![r.start(), r.end()]).unwrap_or_default()
}

fn busy() -> JsValue {
    JsValue::from_str("Zoom viewport is busy")
}

/// Zoom controller of one dashboard chart, exposed to the page script
#[wasm_bindgen]
pub struct ZoomViewport {
    viewport: PageViewport,
    client: Rc<ChartSeriesClient>,
}

#[wasm_bindgen]
impl ZoomViewport {
    /// `chart` must provide `setWindow(start, end)` and `xAxisExtremes()`.
    /// `config_json` is an optional camelCase [`ViewportConfig`].
    #[wasm_bindgen(constructor)]
    pub fn new(
        chart_id: String,
        chart: JsValue,
        selector_id: &str,
        config_json: Option<String>,
        api_base: Option<String>,
    ) -> Result<ZoomViewport, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => ViewportConfig::from_json(json).map_err(js_error)?,
            None => ViewportConfig::default(),
        };
        let widget = JsChartWidget::new(chart).map_err(js_error)?;
        let handles = DomSelectorHandles::from_id(selector_id).map_err(js_error)?;
        let controller =
            ViewportController::new(chart_id, config, widget, BrowserQueryStore::new(), handles).map_err(js_error)?;

        Ok(Self {
            viewport: SharedViewport::new(controller),
            client: Rc::new(ChartSeriesClient::new(api_base.unwrap_or_default())),
        })
    }

    /// Apply the zoom from the URL (or the default) to already-loaded data
    #[wasm_bindgen(js_name = initialize)]
    pub fn initialize(&self, min: f64, max: f64) -> Result<Vec<f64>, JsValue> {
        let extremes = Extremes::new(min, max).map_err(js_error)?;
        self.viewport
            .update(|c| window_of(c.initialize_from_query(extremes)))
            .ok_or_else(busy)
    }

    #[wasm_bindgen(js_name = selectPreset)]
    pub fn select_preset(&self, name: &str) -> Result<Vec<f64>, JsValue> {
        let preset = Preset::from_str(name).map_err(|_| js_error(format!("Unknown zoom preset '{}'", name)))?;
        Ok(window_of(self.viewport.dispatch(ViewportEvent::PresetSelected(preset))))
    }

    /// Drag or wheel zoom finished on the chart
    #[wasm_bindgen(js_name = gesture)]
    pub fn gesture(&self, start: f64, end: f64) -> Vec<f64> {
        window_of(self.viewport.dispatch(ViewportEvent::GestureRange { start, end }))
    }

    /// Safe to call from the chart's draw callback, including while `setWindow` runs
    #[wasm_bindgen(js_name = redraw)]
    pub fn redraw(&self, first_draw: bool, start: f64, end: f64) -> Vec<f64> {
        window_of(self.viewport.dispatch(ViewportEvent::Redraw { first_draw, start, end }))
    }

    /// Switch the x axis; `block_time_ms` is only read for `height`
    #[wasm_bindgen(js_name = changeAxis)]
    pub fn change_axis(&self, kind: &str, block_time_ms: Option<f64>, min: f64, max: f64) -> Result<Vec<f64>, JsValue> {
        let kind = AxisKind::from_str(kind).map_err(|_| js_error(format!("Unknown axis '{}'", kind)))?;
        let axis = match kind {
            AxisKind::Time => Axis::time(),
            AxisKind::Height => {
                let configured = self.viewport.read(|c| c.config().block_time_ms).ok_or_else(busy)?;
                Axis::height(block_time_ms.unwrap_or(configured)).map_err(js_error)?
            }
        };
        let extremes = Extremes::new(min, max).map_err(js_error)?;
        self.viewport
            .update(|c| window_of(c.change_axis(axis, extremes)))
            .ok_or_else(busy)
    }

    /// Fetch `/api/charts/{chart}` and carry the zoom over to the new data.
    ///
    /// `on_data` receives the parsed payload before the window is applied, so the
    /// page can hand it to the chart. Responses overtaken by a newer reload are dropped.
    #[wasm_bindgen(js_name = reload)]
    pub fn reload(&self, chart: String, bin: String, on_data: Function) -> Promise {
        let viewport = self.viewport.clone();
        let client = Rc::clone(&self.client);

        future_to_promise(async move {
            let axis = viewport.read(|c| c.state().axis.kind).ok_or_else(busy)?;
            let query = SeriesQuery::new(chart, bin, axis);
            let transition = reload_series(&viewport, client.as_ref(), &query, |series| {
                let delivered = JsValue::from_serde(&series.payload)
                    .map_err(js_error)
                    .and_then(|payload| on_data.call1(&JsValue::NULL, &payload));
                if let Err(e) = delivered {
                    get_logger().error(
                        LogComponent::Presentation("ZoomViewport"),
                        &format!("❌ Failed to hand {} data to the chart: {:?}", query.chart, e),
                    );
                }
            })
            .await;

            let window = window_of(transition);
            Ok(js_sys::Float64Array::from(window.as_slice()).into())
        })
    }

    /// Value currently written to the query string
    #[wasm_bindgen(js_name = queryValue)]
    pub fn query_value(&self) -> Option<String> {
        self.viewport.read(|c| c.state().query_value()).flatten()
    }

    #[wasm_bindgen(js_name = activePreset)]
    pub fn active_preset(&self) -> Option<String> {
        self.viewport.read(|c| c.state().active_preset).flatten().map(|p| p.to_string())
    }

    #[wasm_bindgen(js_name = isReloading)]
    pub fn is_reloading(&self) -> bool {
        self.viewport.read(|c| c.is_reloading()).unwrap_or(false)
    }
}
