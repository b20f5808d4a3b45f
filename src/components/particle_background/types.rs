//! Plain data types shared by the simulation and the component.

use serde::Deserialize;

/// A point in viewport (CSS pixel) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Moves `t` of the way towards `other`.
	pub fn lerp(self, other: Point, t: f64) -> Self {
		Self {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
		}
	}
}

/// Axis-aligned rectangle in viewport coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub left: f64,
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
}

impl Rect {
	pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
		Self {
			left,
			top,
			right,
			bottom,
		}
	}

	/// Inclusive containment test.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
	}

	/// Grows the rectangle upwards by `padding`.
	pub fn pad_top(self, padding: f64) -> Self {
		Self {
			top: self.top - padding,
			..self
		}
	}
}

/// Options the host page may supply when mounting the background.
///
/// Read from a `<script id="particle-options" type="application/json">` element:
///
/// ```json
/// { "header_selector": ".cr-header", "seed": 42 }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MountOptions {
	/// CSS selector of the header region the pointer is ignored over.
	pub header_selector: String,
	/// Fixed RNG seed. When absent each session draws a fresh seed.
	pub seed: Option<u64>,
}

impl Default for MountOptions {
	fn default() -> Self {
		Self {
			header_selector: ".cr-header".to_string(),
			seed: None,
		}
	}
}
