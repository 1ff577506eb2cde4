#![cfg(target_arch = "wasm32")]

use dashboard_zoom_wasm::application::{ChartWidget, QueryStore, SelectorHandles};
use dashboard_zoom_wasm::domain::zoom::{Axis, Preset, ZoomRange};
use dashboard_zoom_wasm::infrastructure::{BrowserQueryStore, DomSelectorHandles, JsChartWidget};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn selector_root() -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_inner_html(
        r#"<button data-option="day"></button><button data-option="week"></button><button data-option="all" class="active"></button>"#,
    );
    document.body().unwrap().append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn query_store_rewrites_location() {
    let mut store = BrowserQueryStore::new();
    store.set("zoom", "week").unwrap();
    assert_eq!(store.get("zoom").as_deref(), Some("week"));

    store.remove("zoom").unwrap();
    assert_eq!(store.get("zoom"), None);
    let search = web_sys::window().unwrap().location().search().unwrap();
    assert!(!search.contains("zoom="));
}

#[wasm_bindgen_test]
fn dom_handles_toggle_classes() {
    let root = selector_root();
    let mut handles = DomSelectorHandles::new(root.clone());

    handles.set_visible(Preset::Week, false);
    handles.set_active(Some(Preset::Day));
    handles.set_selector_visible(false);

    let week = root.query_selector("[data-option=\"week\"]").unwrap().unwrap();
    let day = root.query_selector("[data-option=\"day\"]").unwrap().unwrap();
    let all = root.query_selector("[data-option=\"all\"]").unwrap().unwrap();
    assert!(week.class_list().contains("d-hide"));
    assert!(day.class_list().contains("active"));
    assert!(!all.class_list().contains("active"));
    assert!(root.class_list().contains("d-hide"));
}

#[wasm_bindgen_test]
fn js_widget_calls_chart_methods() {
    let chart = js_sys::Function::new_no_args(
        "const c = { win: null };\
         c.setWindow = (s, e) => { c.win = [s, e]; };\
         c.xAxisExtremes = () => ({ min: 0, max: 500 });\
         return c;",
    )
    .call0(&JsValue::NULL)
    .unwrap();

    let mut widget = JsChartWidget::new(chart.clone()).unwrap();
    widget.set_window(&ZoomRange::new(100.0, 200.0, Axis::time()).unwrap());

    let win = js_sys::Array::from(&js_sys::Reflect::get(&chart, &"win".into()).unwrap());
    assert_eq!((win.get(0).as_f64(), win.get(1).as_f64()), (Some(100.0), Some(200.0)));
    let ex = widget.data_extremes().unwrap();
    assert_eq!((ex.min, ex.max), (0.0, 500.0));
}

#[wasm_bindgen_test]
fn js_widget_requires_methods() {
    assert!(JsChartWidget::new(js_sys::Object::new().into()).is_err());
}
