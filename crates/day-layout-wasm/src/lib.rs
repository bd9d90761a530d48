//! WASM bindings for the day-track layout.
//!
//! Exposes `layOutDay` and `renderDay` to JavaScript. Both take a JSON array
//! of `{start, end}` records and return JSON; errors surface as thrown
//! exceptions carrying the error message.

use day_layout::{lay_out, EventRecord, Interval, LayoutEngine, PlacementSink, TrackConfig};
use wasm_bindgen::prelude::*;

/// Column assignments for a day of events, as a JSON string.
#[wasm_bindgen(js_name = layOutDay)]
pub fn lay_out_day(records_json: &str) -> Result<String, JsValue> {
    lay_out_day_json(records_json).map_err(|e| JsValue::from_str(&e))
}

/// Pixel placements for a day of events, as a JSON string.
#[wasm_bindgen(js_name = renderDay)]
pub fn render_day(
    records_json: &str,
    width: f64,
    margin: f64,
    gutter: f64,
) -> Result<String, JsValue> {
    let config = TrackConfig {
        width,
        margin,
        gutter,
    };
    render_day_json(records_json, config).map_err(|e| JsValue::from_str(&e))
}

pub fn lay_out_day_json(records_json: &str) -> Result<String, String> {
    let intervals = parse(records_json)?;
    serde_json::to_string(&lay_out(&intervals)).map_err(|e| e.to_string())
}

pub fn render_day_json(records_json: &str, config: TrackConfig) -> Result<String, String> {
    let intervals = parse(records_json)?;
    let sink = PlacementSink::new(config).map_err(|e| e.to_string())?;
    let mut engine = LayoutEngine::new(sink);
    engine.set_intervals(intervals);
    serde_json::to_string(engine.sink().placements()).map_err(|e| e.to_string())
}

fn parse(records_json: &str) -> Result<Vec<Interval>, String> {
    let records: Vec<EventRecord> =
        serde_json::from_str(records_json).map_err(|e| format!("Invalid records: {e}"))?;
    records
        .iter()
        .map(|record| record.to_interval().map_err(|e| e.to_string()))
        .collect()
}
