use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo::net::http::Request;
use serde_json::Value;

use crate::application::ports::{SeriesData, SeriesQuery, SeriesSource};
use crate::domain::errors::{InfrastructureError, InfrastructureResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::zoom::{AxisKind, Extremes};

/// Client for the dashboard's `/api/charts/{chart}` endpoint
#[derive(Clone, Debug)]
pub struct ChartSeriesClient {
    base_url: String,
}

impl Default for ChartSeriesClient {
    fn default() -> Self {
        Self::new("")
    }
}

impl ChartSeriesClient {
    /// `base_url` may be empty for same-origin requests
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    pub fn series_url(&self, query: &SeriesQuery) -> String {
        format!(
            "{}/api/charts/{}?bin={}&axis={}",
            self.base_url, query.chart, query.bin, query.axis
        )
    }

    pub async fn get_series(&self, query: &SeriesQuery) -> InfrastructureResult<SeriesData> {
        let url = self.series_url(query);
        get_logger().debug(LogComponent::Infrastructure("ChartSeriesClient"), &format!("📡 GET {}", url));

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| InfrastructureError::Network(format!("Failed to send request: {:?}", e)))?;

        if !response.ok() {
            return Err(InfrastructureError::Network(format!(
                "HTTP error: {} - {}",
                response.status(),
                response.status_text()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| InfrastructureError::Parse(format!("Failed to parse JSON: {:?}", e)))?;

        let extremes = extremes_from_payload(&payload, query)?;
        get_logger().debug(
            LogComponent::Infrastructure("ChartSeriesClient"),
            &format!("✅ {} spans [{}, {}]", query.chart, extremes.min, extremes.max),
        );
        Ok(SeriesData { extremes, payload })
    }
}

impl SeriesSource for ChartSeriesClient {
    fn fetch<'a>(&'a self, query: &'a SeriesQuery) -> LocalBoxFuture<'a, Result<SeriesData, InfrastructureError>> {
        self.get_series(query).boxed_local()
    }
}

/// X bounds of a chart payload.
///
/// Time series carry `t` in unix seconds (converted to ms), height series carry
/// `h`. Per-block height series may omit `h`; their x values are array indices.
pub fn extremes_from_payload(payload: &Value, query: &SeriesQuery) -> InfrastructureResult<Extremes> {
    let object = payload
        .as_object()
        .ok_or_else(|| InfrastructureError::Parse("Response is not an object".to_string()))?;

    let bounds = match query.axis {
        AxisKind::Time => numeric_bounds(object.get("t"))?.map(|(min, max)| (min * 1000.0, max * 1000.0)),
        AxisKind::Height => match numeric_bounds(object.get("h"))? {
            Some(bounds) => Some(bounds),
            None => object
                .values()
                .filter_map(Value::as_array)
                .map(Vec::len)
                .max()
                .filter(|len| *len > 0)
                .map(|len| (0.0, (len - 1) as f64)),
        },
    };

    let (min, max) = bounds.ok_or_else(|| {
        InfrastructureError::Parse(format!("No {} axis values in {} response", query.axis, query.chart))
    })?;
    Extremes::new(min, max).map_err(|e| InfrastructureError::Parse(e.to_string()))
}

fn numeric_bounds(values: Option<&Value>) -> InfrastructureResult<Option<(f64, f64)>> {
    let Some(values) = values else {
        return Ok(None);
    };
    let array = values
        .as_array()
        .ok_or_else(|| InfrastructureError::Parse("Axis values are not an array".to_string()))?;

    let mut bounds: Option<(f64, f64)> = None;
    for value in array {
        let v = value
            .as_f64()
            .ok_or_else(|| InfrastructureError::Parse(format!("Invalid axis value: {}", value)))?;
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(v), max.max(v)),
            None => (v, v),
        });
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn time_payload_is_converted_to_millis() {
        let query = SeriesQuery::new("ticket-price", "day", AxisKind::Time);
        let payload = json!({ "t": [1_454_889_600u64, 1_590_883_200u64], "price": [1, 2] });
        let ex = extremes_from_payload(&payload, &query).unwrap();
        assert_eq!((ex.min, ex.max), (1_454_889_600_000.0, 1_590_883_200_000.0));
    }

    #[test]
    fn block_bin_without_heights_uses_indices() {
        let query = SeriesQuery::new("privacy-participation", "block", AxisKind::Height);
        let payload = json!({ "axis": "height", "bin": "block", "anonymitySet": [0, 5, 7, 9] });
        let ex = extremes_from_payload(&payload, &query).unwrap();
        assert_eq!((ex.min, ex.max), (0.0, 3.0));
    }

    #[test]
    fn missing_axis_values_is_a_parse_error() {
        let query = SeriesQuery::new("ticket-price", "day", AxisKind::Time);
        let err = extremes_from_payload(&json!({ "price": [] }), &query).unwrap_err();
        assert!(matches!(err, InfrastructureError::Parse(_)));
    }

    #[test]
    fn url_includes_bin_and_axis() {
        let client = ChartSeriesClient::new("https://explorer.example/");
        let query = SeriesQuery::new("coin-supply", "day", AxisKind::Height);
        assert_eq!(client.series_url(&query), "https://explorer.example/api/charts/coin-supply?bin=day&axis=height");
    }
}
