//! The attractor center the whole field orbits.
//!
//! After mount or resize the center is held at the canvas middle for a short
//! protection window so the first frames are calm. Afterwards, while the
//! pointer is away, an idle center glides between random waypoints.

use std::f64::consts::TAU;

use log::debug;
use rand::Rng;

use super::config::SimulationConfig;
use super::input::ViewportState;
use super::types::Point;

/// Waypoint spread relative to the available half-extent.
const WAYPOINT_SPREAD_X: f64 = 0.9;
const WAYPOINT_SPREAD_Y: f64 = 0.95;
/// Cap on the horizontal half-extent as a fraction of the width.
const WAYPOINT_MAX_X_FRACTION: f64 = 0.45;
/// Attempts at drawing a waypoint that differs from the current one.
const WAYPOINT_ATTEMPTS: usize = 4;

/// Where particles are pulled to this frame, and how hard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attractor {
	pub center: Point,
	pub force_scale: f64,
}

/// Positions and timers of the center state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CenterState {
	/// Geometric canvas center, recomputed on resize.
	pub initial_center: Point,
	/// Current idle center, blended towards `target_center`.
	pub random_center: Point,
	pub target_center: Point,
	pub center_change_timer: f64,
	pub init_protection_timer: f64,
}

/// Drives [`CenterState`] once per frame.
#[derive(Clone, Debug, Default)]
pub struct CenterController {
	state: CenterState,
}

impl CenterController {
	pub fn new(viewport: &ViewportState) -> Self {
		let mut controller = Self::default();
		controller.reset(viewport);
		controller
	}

	pub fn state(&self) -> &CenterState {
		&self.state
	}

	/// Re-center on a new viewport and restart the protection window.
	///
	/// The waypoint timer carries over.
	pub fn reset(&mut self, viewport: &ViewportState) {
		let center = viewport.center();
		self.state.initial_center = center;
		self.state.random_center = center;
		self.state.target_center = center;
		self.state.init_protection_timer = 0.0;
	}

	pub fn in_protection(&self, config: &SimulationConfig) -> bool {
		self.state.init_protection_timer < config.protection_interval
	}

	/// Advance one frame.
	///
	/// `pointer_present` is whether the pointer is inside the viewport at all;
	/// the waypoint timer only runs while it is not.
	pub fn advance<R: Rng + ?Sized>(
		&mut self,
		pointer_present: bool,
		viewport: &ViewportState,
		config: &SimulationConfig,
		rng: &mut R,
	) {
		let s = &mut self.state;

		if s.init_protection_timer < config.protection_interval {
			s.init_protection_timer += config.frame_step;
			s.random_center = s.initial_center;
			s.target_center = s.initial_center;
			return;
		}

		if !pointer_present {
			s.center_change_timer += config.frame_step;
			if s.center_change_timer > config.center_change_interval {
				let previous = s.target_center;
				let mut next = random_waypoint(viewport, config, rng);
				for _ in 1..WAYPOINT_ATTEMPTS {
					if next != previous {
						break;
					}
					next = random_waypoint(viewport, config, rng);
				}
				s.target_center = next;
				s.center_change_timer = 0.0;
				debug!(
					"panel-particles: new waypoint ({:.1}, {:.1}), {:.1}px from center",
					next.x,
					next.y,
					next.distance(viewport.center())
				);
			}
		}

		if s.random_center.distance(s.target_center) < config.center_snap_distance {
			s.random_center = s.target_center;
		} else {
			s.random_center = s.random_center.lerp(s.target_center, config.center_transition);
		}
	}
}

/// Draw a waypoint inside the ellipse around the canvas center, kept at least
/// `waypoint_margin` away from every edge.
///
/// Canvases too small to have such a region get their center back.
pub fn random_waypoint<R: Rng + ?Sized>(
	viewport: &ViewportState,
	config: &SimulationConfig,
	rng: &mut R,
) -> Point {
	let safe = config.waypoint_margin;
	let center = viewport.center();
	if viewport.width <= safe * 2.0 || viewport.height <= safe * 2.0 {
		return center;
	}

	let max_dx = (center.x - safe).min(viewport.width * WAYPOINT_MAX_X_FRACTION);
	let max_dy = center.y - safe;

	let angle = rng.r#gen::<f64>() * TAU;
	let dx = rng.r#gen::<f64>() * max_dx * WAYPOINT_SPREAD_X * angle.cos();
	let dy = rng.r#gen::<f64>() * max_dy * WAYPOINT_SPREAD_Y * angle.sin();

	Point::new(
		(center.x + dx).clamp(safe, viewport.width - safe),
		(center.y + dy).clamp(safe, viewport.height - safe),
	)
}

/// Pick this frame's attractor.
///
/// `pointer_focus` is the pointer position when it is inside the viewport and
/// not over the header; anything else falls back to the idle center.
pub fn select_attractor(
	controller: &CenterController,
	pointer_focus: Option<Point>,
	config: &SimulationConfig,
) -> Attractor {
	if controller.in_protection(config) {
		return Attractor {
			center: controller.state.initial_center,
			force_scale: config.protection_force_scale,
		};
	}

	match pointer_focus {
		Some(center) => Attractor {
			center,
			force_scale: config.pointer_force_scale,
		},
		None => Attractor {
			center: controller.state.random_center,
			force_scale: config.idle_force_scale,
		},
	}
}
