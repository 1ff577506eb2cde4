use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::application::ports::ChartWidget;
use crate::domain::errors::{InfrastructureError, InfrastructureResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::zoom::{Extremes, ZoomRange};

/// A JavaScript chart object exposing `setWindow(start, end)` and `xAxisExtremes()`.
///
/// `xAxisExtremes` may return `[min, max]`, `{ min, max }` or nothing before
/// the first data load.
#[derive(Clone, Debug)]
pub struct JsChartWidget {
    chart: JsValue,
}

impl JsChartWidget {
    pub fn new(chart: JsValue) -> InfrastructureResult<Self> {
        for name in ["setWindow", "xAxisExtremes"] {
            method(&chart, name)?;
        }
        Ok(Self { chart })
    }

    pub fn inner(&self) -> &JsValue {
        &self.chart
    }

    fn call_set_window(&self, range: &ZoomRange) -> InfrastructureResult<()> {
        method(&self.chart, "setWindow")?
            .call2(&self.chart, &range.start().into(), &range.end().into())
            .map(|_| ())
            .map_err(|e| InfrastructureError::BrowserApi(format!("setWindow failed: {:?}", e)))
    }

    fn call_extremes(&self) -> InfrastructureResult<Option<Extremes>> {
        let value = method(&self.chart, "xAxisExtremes")?
            .call0(&self.chart)
            .map_err(|e| InfrastructureError::BrowserApi(format!("xAxisExtremes failed: {:?}", e)))?;
        extremes_from_js(&value)
    }
}

fn method(target: &JsValue, name: &str) -> InfrastructureResult<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| InfrastructureError::BrowserApi(format!("Chart has no '{}' method", name)))
}

fn extremes_from_js(value: &JsValue) -> InfrastructureResult<Option<Extremes>> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let (min, max) = if Array::is_array(value) {
        let array = Array::from(value);
        (array.get(0).as_f64(), array.get(1).as_f64())
    } else {
        let field = |name: &str| Reflect::get(value, &JsValue::from_str(name)).ok().and_then(|v| v.as_f64());
        (field("min"), field("max"))
    };
    match (min, max) {
        (Some(min), Some(max)) => Extremes::new(min, max)
            .map(Some)
            .map_err(|e| InfrastructureError::Parse(e.to_string())),
        _ => Err(InfrastructureError::Parse(format!("Unexpected extremes value: {:?}", value))),
    }
}

impl ChartWidget for JsChartWidget {
    fn set_window(&mut self, range: &ZoomRange) {
        if let Err(e) = self.call_set_window(range) {
            get_logger().error(LogComponent::Infrastructure("JsChartWidget"), &e.to_string());
        }
    }

    fn data_extremes(&self) -> Option<Extremes> {
        self.call_extremes().unwrap_or_else(|e| {
            get_logger().warn(LogComponent::Infrastructure("JsChartWidget"), &e.to_string());
            None
        })
    }
}
