//! Build-time tuning of the particle field.

/// Frame-level constants of the simulation and its host wiring.
///
/// Time values are nominal seconds accumulated in steps of `frame_step` per
/// rendered frame, so the simulation runs in frames rather than wall-clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	/// Population size, fixed for the session.
	pub particle_count: usize,
	/// Number of recent positions kept per particle for its trail.
	pub trail_length: usize,
	/// Simulated time added per frame.
	pub frame_step: f64,
	/// Time after mount/resize during which the canvas center is forced.
	pub protection_interval: f64,
	/// Idle time between two random waypoints.
	pub center_change_interval: f64,
	/// Fraction of the remaining distance the idle center covers per frame.
	pub center_transition: f64,
	/// Below this distance the idle center snaps onto its waypoint.
	pub center_snap_distance: f64,
	/// Minimum distance between a waypoint and any canvas edge.
	pub waypoint_margin: f64,
	/// Velocity multiplier applied every frame.
	pub friction: f64,
	/// Maximum particle speed in pixels per frame.
	pub speed_limit: f64,
	/// Distance outside the canvas at which particles wrap around.
	pub wrap_margin: f64,
	/// Force scale while following the pointer.
	pub pointer_force_scale: f64,
	/// Force scale while orbiting the idle center.
	pub idle_force_scale: f64,
	/// Force scale during the protection window.
	pub protection_force_scale: f64,
	/// Extra band above the header that still counts as header.
	pub header_padding: f64,
	/// Quiet period after the last resize before the canvas is shown again.
	pub resize_settle_ms: f64,
	/// Stroke and fill opacity of every particle.
	pub alpha: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			particle_count: 300,
			trail_length: 5,
			frame_step: 0.01,
			protection_interval: 1.2,
			center_change_interval: 2.0,
			center_transition: 0.004,
			center_snap_distance: 0.1,
			waypoint_margin: 100.0,
			friction: 0.92,
			speed_limit: 3.0,
			wrap_margin: 50.0,
			pointer_force_scale: 0.8,
			idle_force_scale: 1.5,
			protection_force_scale: 1.0,
			header_padding: 12.0,
			resize_settle_ms: 300.0,
			alpha: 0.8,
		}
	}
}
