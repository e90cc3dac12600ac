//! WASM bindings for the browser editor.
//!
//! Exposes `validate`, `layout` and `edgePath` to JavaScript via wasm-bindgen.
//! Pipelines cross the boundary as JSON in the editor's export format.

use wasm_bindgen::prelude::*;

use crate::config::LayoutConfig;
use crate::geometry::{Point, edge_path as curve};
use crate::model::Pipeline;

/// Validate a pipeline. Returns `{"isValid": .., "errors": [..]}` as JSON.
#[wasm_bindgen]
pub fn validate(pipeline_json: &str) -> Result<String, JsError> {
    let pipeline = Pipeline::from_json(pipeline_json)?;
    Ok(serde_json::to_string(&pipeline.validate())?)
}

/// Auto-arrange a pipeline and return it as JSON.
///
/// - `config_toml`: layout options as TOML, or an empty string for defaults
#[wasm_bindgen]
pub fn layout(pipeline_json: &str, config_toml: &str) -> Result<String, JsError> {
    let pipeline = Pipeline::from_json(pipeline_json)?;
    let config = if config_toml.trim().is_empty() {
        LayoutConfig::default()
    } else {
        LayoutConfig::from_toml_str(config_toml)?
    };
    Ok(serde_json::to_string(&pipeline.arranged(&config))?)
}

/// SVG path data for the curve between two connection points.
#[wasm_bindgen(js_name = "edgePath")]
pub fn edge_path(sx: f64, sy: f64, tx: f64, ty: f64) -> String {
    curve(Point::new(sx, sy), Point::new(tx, ty)).to_string()
}
