//! Pointer, viewport and resize tracking.
//!
//! Event handlers write into these types; the animation tick only reads them.

use super::types::{Point, Rect};

/// Source of the header rectangle, queried fresh on every frame.
///
/// Returns `None` when the header does not exist, which is treated as
/// "pointer not over header".
pub trait HeaderRegionProvider {
	fn header_rect(&self) -> Option<Rect>;
}

impl<F> HeaderRegionProvider for F
where
	F: Fn() -> Option<Rect>,
{
	fn header_rect(&self) -> Option<Rect> {
		self()
	}
}

/// Provider for hosts without a header.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeader;

impl HeaderRegionProvider for NoHeader {
	fn header_rect(&self) -> Option<Rect> {
		None
	}
}

/// Canvas size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportState {
	pub width: f64,
	pub height: f64,
}

impl ViewportState {
	pub fn new(width: f64, height: f64) -> Self {
		// NaN collapses to 0 as well
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}

	/// True when `p` lies on or beyond a viewport edge.
	pub fn is_outside(&self, p: Point) -> bool {
		p.x <= 0.0 || p.x >= self.width || p.y <= 0.0 || p.y >= self.height
	}
}

/// Last known pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub position: Option<Point>,
	pub inside_viewport: bool,
}

impl PointerState {
	pub fn on_move(&mut self, x: f64, y: f64) {
		self.position = Some(Point::new(x, y));
		self.inside_viewport = true;
	}

	/// Handles a `mouseout` reaching the window.
	///
	/// Leaves bubbling up from child elements carry a related target and
	/// in-bounds coordinates; those are ignored.
	pub fn on_leave(&mut self, x: f64, y: f64, has_related_target: bool, viewport: &ViewportState) {
		if !has_related_target || viewport.is_outside(Point::new(x, y)) {
			self.position = None;
			self.inside_viewport = false;
		}
	}

	/// Position of a pointer currently inside the viewport.
	pub fn present(&self) -> Option<Point> {
		if self.inside_viewport { self.position } else { None }
	}
}

/// Pointer and viewport state plus the header hit-test.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
	pub pointer: PointerState,
	pub viewport: ViewportState,
	pub header_padding: f64,
}

impl InputTracker {
	pub fn new(header_padding: f64) -> Self {
		Self {
			header_padding,
			..Self::default()
		}
	}

	pub fn inside_header(&self, header: &dyn HeaderRegionProvider) -> bool {
		let Some(p) = self.pointer.present() else {
			return false;
		};
		header
			.header_rect()
			.is_some_and(|rect| rect.pad_top(self.header_padding).contains(p))
	}

	/// The pointer position particles should follow, if any.
	///
	/// `None` when the pointer is absent or over the header.
	pub fn pointer_focus(&self, header: &dyn HeaderRegionProvider) -> Option<Point> {
		if self.inside_header(header) {
			None
		} else {
			self.pointer.present()
		}
	}
}

/// Debounced "show canvas" after a burst of resize events.
///
/// Each resize hides the canvas and pushes the show deadline out to
/// `last event + delay`; the canvas becomes visible only once events stop.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeSettle {
	delay_ms: f64,
	deadline: Option<f64>,
	visible: bool,
}

impl ResizeSettle {
	pub fn new(delay_ms: f64) -> Self {
		Self {
			delay_ms,
			deadline: None,
			visible: true,
		}
	}

	pub fn delay_ms(&self) -> f64 {
		self.delay_ms
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	pub fn deadline(&self) -> Option<f64> {
		self.deadline
	}

	/// Hide and (re)start the settle period. Returns the new deadline.
	pub fn on_resize(&mut self, now_ms: f64) -> f64 {
		let deadline = now_ms + self.delay_ms;
		self.visible = false;
		self.deadline = Some(deadline);
		deadline
	}

	/// Show if a settle period is pending. Returns whether visibility changed.
	pub fn fire(&mut self) -> bool {
		if self.deadline.take().is_some() {
			self.visible = true;
			true
		} else {
			false
		}
	}

	/// Clock-driven variant of [`fire`](Self::fire).
	pub fn poll(&mut self, now_ms: f64) -> bool {
		match self.deadline {
			Some(deadline) if now_ms >= deadline => self.fire(),
			_ => false,
		}
	}

	/// Drop a pending deadline without showing.
	pub fn cancel(&mut self) {
		self.deadline = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn header() -> Option<Rect> {
		Some(Rect::new(0.0, 20.0, 400.0, 80.0))
	}

	#[test]
	fn move_then_leave_through_window_edge() {
		let viewport = ViewportState::new(800.0, 600.0);
		let mut pointer = PointerState::default();
		pointer.on_move(100.0, 200.0);
		assert_eq!(pointer.present(), Some(Point::new(100.0, 200.0)));

		pointer.on_leave(0.0, 200.0, true, &viewport);
		assert_eq!(pointer.present(), None);
		assert!(!pointer.inside_viewport);
	}

	#[test]
	fn leave_from_child_element_is_ignored() {
		let viewport = ViewportState::new(800.0, 600.0);
		let mut pointer = PointerState::default();
		pointer.on_move(100.0, 200.0);
		pointer.on_leave(120.0, 210.0, true, &viewport);
		assert_eq!(pointer.present(), Some(Point::new(100.0, 200.0)));
		assert!(pointer.inside_viewport);
	}

	#[test]
	fn leave_without_related_target_clears() {
		let viewport = ViewportState::new(800.0, 600.0);
		let mut pointer = PointerState::default();
		pointer.on_move(100.0, 200.0);
		pointer.on_leave(100.0, 200.0, false, &viewport);
		assert_eq!(pointer.present(), None);
	}

	#[test]
	fn header_hit_test_includes_padding() {
		let mut input = InputTracker::new(12.0);
		input.viewport = ViewportState::new(800.0, 600.0);

		input.pointer.on_move(50.0, 10.0);
		assert!(input.inside_header(&header));
		assert_eq!(input.pointer_focus(&header), None);

		input.pointer.on_move(50.0, 5.0);
		assert!(!input.inside_header(&header));
		assert_eq!(input.pointer_focus(&header), Some(Point::new(50.0, 5.0)));
	}

	#[test]
	fn missing_header_is_never_hit() {
		let mut input = InputTracker::new(12.0);
		input.pointer.on_move(50.0, 50.0);
		assert!(!input.inside_header(&NoHeader));
		assert_eq!(input.pointer_focus(&NoHeader), Some(Point::new(50.0, 50.0)));
	}

	#[test]
	fn resize_burst_shows_once_after_last_event() {
		let mut settle = ResizeSettle::new(300.0);
		let mut shows = Vec::new();
		let events = [0.0, 50.0, 100.0, 150.0, 200.0];

		let mut next_event = 0;
		for now in 0..1000 {
			let now = now as f64;
			if next_event < events.len() && events[next_event] == now {
				settle.on_resize(now);
				next_event += 1;
			}
			if settle.poll(now) {
				shows.push(now);
			}
			if now < 500.0 {
				assert!(!settle.is_visible(), "visible early at {now}");
			}
		}

		assert_eq!(shows, vec![500.0]);
		assert!(settle.is_visible());
	}

	#[test]
	fn fire_is_idempotent_and_cancel_keeps_hidden() {
		let mut settle = ResizeSettle::new(300.0);
		assert!(!settle.fire());

		settle.on_resize(10.0);
		settle.cancel();
		assert!(!settle.fire());
		assert!(!settle.is_visible());

		assert_eq!(settle.on_resize(20.0), 320.0);
		assert_eq!(settle.deadline(), Some(320.0));
		assert!(settle.fire());
		assert_eq!(settle.deadline(), None);
		assert!(!settle.fire());
	}

	#[test]
	fn negative_viewport_collapses_to_empty() {
		let viewport = ViewportState::new(-5.0, 10.0);
		assert!(viewport.is_empty());
		assert_eq!(viewport.width, 0.0);
	}
}
