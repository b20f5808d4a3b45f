//! Small browser helpers shared by the component and its scheduling handles.

use std::fmt::Debug;

use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// Log a failed DOM call and turn it into `None`.
pub fn warn_on_err<T, E: Debug>(action: &str, result: Result<T, E>) -> Option<T> {
	match result {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("panel-particles: {} failed: {:?}", action, e);
			None
		}
	}
}

/// Window inner size in CSS pixels; 0 when unavailable.
pub fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

/// Device pixel ratio, falling back to 1 for unusable values.
pub fn device_scale(dpr: f64) -> f64 {
	if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Backing store in device pixels, drawing in CSS pixels.
pub fn size_canvas(
	window: &Window,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	w: f64,
	h: f64,
) {
	let dpr = device_scale(window.device_pixel_ratio());
	canvas.set_width((w * dpr) as u32);
	canvas.set_height((h * dpr) as u32);
	warn_on_err("setTransform", ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0));
}
