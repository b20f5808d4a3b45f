//! Simulation state owned by one mounted background.
//!
//! Bundles the pointer/viewport tracker, the center state machine, the
//! particle population, the resize settle debounce and the session palette
//! and RNG. DOM handlers mutate it; the animation tick reads and advances it.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::center::{Attractor, CenterController, select_attractor};
use super::config::SimulationConfig;
use super::input::{HeaderRegionProvider, InputTracker, ResizeSettle, ViewportState};
use super::palette::ColorPalette;
use super::particles::ParticleSystem;
use super::render::Surface;

/// Everything one running particle field needs.
pub struct SimulationContext<R: Rng = SmallRng> {
	pub config: SimulationConfig,
	pub palette: &'static ColorPalette,
	pub input: InputTracker,
	pub center: CenterController,
	/// Created by the first resize.
	pub system: Option<ParticleSystem>,
	pub settle: ResizeSettle,
	rng: R,
	frames: u64,
}

impl SimulationContext<SmallRng> {
	/// Seeded from `seed` when given, otherwise from OS entropy.
	pub fn with_seed(config: SimulationConfig, seed: Option<u64>) -> Self {
		let rng = match seed {
			Some(seed) => SmallRng::seed_from_u64(seed),
			None => SmallRng::from_entropy(),
		};
		Self::new(config, rng)
	}
}

impl<R: Rng> SimulationContext<R> {
	pub fn new(config: SimulationConfig, mut rng: R) -> Self {
		let palette = ColorPalette::select(&mut rng);
		debug!("panel-particles: palette '{}'", palette.name);
		Self {
			input: InputTracker::new(config.header_padding),
			center: CenterController::default(),
			system: None,
			settle: ResizeSettle::new(config.resize_settle_ms),
			palette,
			config,
			rng,
			frames: 0,
		}
	}

	pub fn viewport(&self) -> ViewportState {
		self.input.viewport
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Adopt a new viewport: re-center, restart protection, rebuild the whole
	/// population and hide until the resize burst settles.
	///
	/// Returns the deadline at which the canvas may be shown again.
	pub fn resize(&mut self, width: f64, height: f64, now_ms: f64) -> f64 {
		let viewport = ViewportState::new(width, height);
		self.input.viewport = viewport;
		self.center.reset(&viewport);

		let system = self.system.get_or_insert_with(ParticleSystem::default);
		system.reinitialize(
			self.config.particle_count,
			&viewport,
			self.palette,
			self.config.trail_length,
			&mut self.rng,
		);
		debug!(
			"panel-particles: rebuilt {} particles for {}x{}",
			system.len(),
			viewport.width,
			viewport.height
		);

		self.settle.on_resize(now_ms)
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		self.input.pointer.on_move(x, y);
	}

	pub fn pointer_leave(&mut self, x: f64, y: f64, has_related_target: bool) {
		let viewport = self.input.viewport;
		self.input.pointer.on_leave(x, y, has_related_target, &viewport);
	}

	/// Poll the settle debounce against a clock. Returns true when the canvas
	/// just became visible.
	pub fn settle_elapsed(&mut self, now_ms: f64) -> bool {
		self.settle.poll(now_ms)
	}

	/// The attractor particles would be pulled to right now.
	pub fn attractor(&self, header: &dyn HeaderRegionProvider) -> Attractor {
		select_attractor(&self.center, self.input.pointer_focus(header), &self.config)
	}

	/// Advance the center state machine and pick this frame's attractor.
	///
	/// `None` before the first resize and while the viewport has no area.
	fn advance_center(&mut self, header: &dyn HeaderRegionProvider) -> Option<Attractor> {
		let viewport = self.input.viewport;
		if viewport.is_empty() || self.system.is_none() {
			return None;
		}

		let pointer_present = self.input.pointer.present().is_some();
		self.center
			.advance(pointer_present, &viewport, &self.config, &mut self.rng);
		Some(self.attractor(header))
	}

	/// Advance the simulation one frame without drawing.
	pub fn step(&mut self, header: &dyn HeaderRegionProvider) -> Option<Attractor> {
		let attractor = self.advance_center(header)?;
		let viewport = self.input.viewport;
		let system = self.system.as_mut()?;
		system.update(attractor, &viewport, &self.config, &mut self.rng);
		self.frames += 1;
		Some(attractor)
	}

	/// One full frame: clear, then update and draw each particle.
	pub fn tick<S: Surface>(
		&mut self,
		header: &dyn HeaderRegionProvider,
		surface: &mut S,
	) -> Option<Attractor> {
		let viewport = self.input.viewport;
		surface.clear(viewport.width, viewport.height);

		let attractor = self.advance_center(header)?;
		let system = self.system.as_mut()?;
		system.tick(attractor, &viewport, &self.config, &mut self.rng, surface);
		self.frames += 1;
		Some(attractor)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_background::input::NoHeader;
	use crate::components::particle_background::render::recording::{Command, RecordingSurface};
	use crate::components::particle_background::types::{Point, Rect};

	fn context(config: SimulationConfig, seed: u64) -> SimulationContext {
		SimulationContext::with_seed(config, Some(seed))
	}

	#[test]
	fn nothing_runs_before_first_resize() {
		let mut ctx = context(SimulationConfig::default(), 1);
		let mut surface = RecordingSurface::default();
		ctx.pointer_move(10.0, 10.0);
		assert_eq!(ctx.tick(&NoHeader, &mut surface), None);
		assert_eq!(surface.commands, vec![Command::Clear]);
		assert_eq!(ctx.frames(), 0);
	}

	#[test]
	fn protection_window_ignores_pointer() {
		let mut ctx = context(SimulationConfig::default(), 2);
		ctx.resize(640.0, 480.0, 0.0);
		ctx.pointer_move(20.0, 30.0);

		for _ in 0..100 {
			let attractor = ctx.step(&NoHeader).unwrap();
			assert_eq!(attractor.center, Point::new(320.0, 240.0));
		}
		for _ in 0..30 {
			ctx.step(&NoHeader);
		}
		assert_eq!(ctx.step(&NoHeader).unwrap().center, Point::new(20.0, 30.0));
	}

	#[test]
	fn idle_field_stays_within_ring_and_wander_bound() {
		let config = SimulationConfig {
			particle_count: 10,
			protection_interval: 0.0,
			..SimulationConfig::default()
		};
		let mut ctx = context(config, 3);
		ctx.resize(400.0, 400.0, 0.0);

		for _ in 0..200 {
			ctx.step(&NoHeader);
		}

		let center = ctx.center.state().random_center;
		for p in ctx.system.as_ref().unwrap().particles() {
			let bound = p.circle_radius * 1.3 + p.wander_radius;
			let dist = p.position().distance(center);
			assert!(dist <= bound, "particle {} at {dist:.1} > {bound:.1}", p.index);
		}
	}

	#[test]
	fn pointer_over_header_uses_idle_center() {
		let config = SimulationConfig {
			protection_interval: 0.0,
			..SimulationConfig::default()
		};
		let mut ctx = context(config, 4);
		ctx.resize(800.0, 600.0, 0.0);
		let header = || Some(Rect::new(0.0, 12.0, 800.0, 64.0));

		ctx.pointer_move(100.0, 40.0);
		let attractor = ctx.step(&header).unwrap();
		assert_eq!(attractor.center, ctx.center.state().random_center);
		assert_eq!(attractor.force_scale, 1.5);

		ctx.pointer_move(100.0, 300.0);
		let attractor = ctx.step(&header).unwrap();
		assert_eq!(attractor.center, Point::new(100.0, 300.0));
		assert_eq!(attractor.force_scale, 0.8);
	}

	#[test]
	fn resize_burst_rebuilds_each_time_but_shows_once() {
		let mut ctx = context(SimulationConfig::default(), 5);
		let mut shows = Vec::new();

		for (i, t) in [0.0, 50.0, 100.0, 150.0, 200.0].into_iter().enumerate() {
			ctx.resize(500.0 + i as f64, 400.0, t);
			assert!(!ctx.settle.is_visible());
			assert_eq!(ctx.system.as_ref().unwrap().len(), 300);
			assert_eq!(ctx.viewport().width, 500.0 + i as f64);
			// Time passes until the next event
			for now in (t as u32)..(t as u32 + 50) {
				if ctx.settle_elapsed(now as f64) {
					shows.push(now);
				}
			}
		}
		for now in 250..1000 {
			if ctx.settle_elapsed(now as f64) {
				shows.push(now);
			}
		}
		assert_eq!(shows, vec![500]);
	}

	#[test]
	fn tick_clears_then_draws_every_particle() {
		let config = SimulationConfig {
			particle_count: 25,
			..SimulationConfig::default()
		};
		let mut ctx = context(config, 6);
		ctx.resize(300.0, 300.0, 0.0);

		let mut surface = RecordingSurface::default();
		ctx.tick(&NoHeader, &mut surface);
		assert_eq!(surface.commands.len(), 26);
		assert_eq!(surface.commands[0], Command::Clear);
	}

	#[test]
	fn empty_viewport_skips_simulation() {
		let mut ctx = context(SimulationConfig::default(), 7);
		ctx.resize(0.0, 0.0, 0.0);
		assert_eq!(ctx.step(&NoHeader), None);
	}

	#[test]
	fn same_seed_same_field() {
		let mut a = context(SimulationConfig::default(), 8);
		let mut b = context(SimulationConfig::default(), 8);
		a.resize(640.0, 480.0, 0.0);
		b.resize(640.0, 480.0, 0.0);
		for _ in 0..50 {
			a.step(&NoHeader);
			b.step(&NoHeader);
		}
		assert_eq!(a.palette, b.palette);
		let positions = |ctx: &SimulationContext| -> Vec<Point> {
			ctx.system
				.as_ref()
				.unwrap()
				.particles()
				.iter()
				.map(|p| p.position())
				.collect()
		};
		assert_eq!(positions(&a), positions(&b));
	}

	#[test]
	fn leave_clears_pointer_only_on_real_exit() {
		let config = SimulationConfig {
			protection_interval: 0.0,
			..SimulationConfig::default()
		};
		let mut ctx = context(config, 9);
		ctx.resize(800.0, 600.0, 0.0);
		ctx.pointer_move(400.0, 300.0);

		ctx.pointer_leave(410.0, 310.0, true);
		assert_eq!(ctx.attractor(&NoHeader).center, Point::new(400.0, 300.0));

		ctx.pointer_leave(805.0, 310.0, true);
		assert_eq!(ctx.attractor(&NoHeader).force_scale, 1.5);
	}
}
