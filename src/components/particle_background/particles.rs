//! Particles orbiting a shared attractor.
//!
//! Each particle owns a slot on a golden-angle spiral around the attractor
//! and meanders around that slot. A dead-zone spring keeps the population in
//! a loose disc without pinning anyone to an exact radius.

use std::collections::VecDeque;
use std::f64::consts::{PI, TAU};

use rand::Rng;

use super::center::Attractor;
use super::config::SimulationConfig;
use super::input::ViewportState;
use super::palette::{ColorPalette, Rgb};
use super::render::Surface;
use super::types::Point;

/// Angular step between consecutive particles: π(3 − √5).
pub fn golden_angle() -> f64 {
	PI * (3.0 - 5f64.sqrt())
}

/// Placement disc radius as a fraction of the shorter viewport side.
const RADIUS_FRACTION: f64 = 0.3;
/// Radial jitter as a fraction of the placement radius (±half of this).
const RADIUS_JITTER: f64 = 0.1;

const PUSH_STRENGTH: f64 = 0.06;
const PULL_STRENGTH: f64 = 0.05;
const INNER_RING: f64 = 0.7;
const OUTER_RING: f64 = 1.3;

const WANDER_PULL: f64 = 0.03;
const WANDER_SPRING: f64 = 0.02;
/// Wander offset radius relative to `wander_radius`.
const WANDER_REACH: f64 = 0.5;

const IMPULSE_PROBABILITY: f64 = 0.02;
const IMPULSE_STRENGTH: f64 = 0.4;

/// A single drifting point.
#[derive(Clone, Debug)]
pub struct Particle {
	pub index: usize,
	pub total: usize,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Assigned polar slot relative to the attractor.
	pub circle_angle: f64,
	pub circle_radius: f64,
	pub size: f64,
	pub color: Rgb,
	/// Placement position, kept for inspection. The walk itself steers
	/// around [`wander_target`](Self::wander_target).
	pub wander_origin: Point,
	pub wander_radius: f64,
	pub wander_angle: f64,
	pub wander_speed: f64,
	/// Recent positions, oldest first.
	pub history: VecDeque<Point>,
	history_capacity: usize,
}

impl Particle {
	/// Place particle `index` of `total` on the spiral around the viewport center.
	pub fn new<R: Rng + ?Sized>(
		index: usize,
		total: usize,
		viewport: &ViewportState,
		palette: &ColorPalette,
		trail_length: usize,
		rng: &mut R,
	) -> Self {
		let center = viewport.center();

		let circle_angle = (index as f64 * golden_angle()) % TAU;
		let radius_range = viewport.width.min(viewport.height) * RADIUS_FRACTION;
		let ratio = if total > 0 {
			(index as f64 / total as f64).sqrt()
		} else {
			0.0
		};
		let jitter = (rng.r#gen::<f64>() - 0.5) * radius_range * RADIUS_JITTER;
		let circle_radius = (ratio * radius_range + jitter).max(0.0);

		let x = center.x + circle_angle.cos() * circle_radius;
		let y = center.y + circle_angle.sin() * circle_radius;

		// Start drifting along the orbit, perpendicular to the radius
		let tangent = circle_angle + PI / 2.0;
		let speed = 0.3 + rng.r#gen::<f64>() * 0.8;

		Self {
			index,
			total,
			x,
			y,
			vx: tangent.cos() * speed,
			vy: tangent.sin() * speed,
			circle_angle,
			circle_radius,
			size: rng.r#gen::<f64>() * 2.0 + 1.0,
			color: palette.pick(rng),
			wander_origin: Point::new(x, y),
			wander_radius: rng.r#gen::<f64>() * 80.0 + 60.0,
			wander_angle: rng.r#gen::<f64>() * TAU,
			wander_speed: rng.r#gen::<f64>() * 0.03 + 0.02,
			history: VecDeque::with_capacity(trail_length + 1),
			history_capacity: trail_length,
		}
	}

	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}

	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}

	/// The particle's orbital slot around `center`.
	pub fn orbit_target(&self, center: Point) -> Point {
		Point::new(
			center.x + self.circle_angle.cos() * self.circle_radius,
			center.y + self.circle_angle.sin() * self.circle_radius,
		)
	}

	/// The moving point the wander walk steers towards.
	pub fn wander_target(&self, center: Point) -> Point {
		let slot = self.orbit_target(center);
		let reach = self.wander_radius * WANDER_REACH;
		Point::new(
			slot.x + self.wander_angle.cos() * reach,
			slot.y + self.wander_angle.sin() * reach,
		)
	}

	/// Advance one frame against `attractor`.
	pub fn update<R: Rng + ?Sized>(
		&mut self,
		attractor: Attractor,
		viewport: &ViewportState,
		config: &SimulationConfig,
		rng: &mut R,
	) {
		let Attractor {
			center,
			force_scale,
		} = attractor;

		self.apply_ring_force(center, force_scale);
		self.apply_wander(center, force_scale);

		if rng.gen_bool(IMPULSE_PROBABILITY) {
			self.vx += (rng.r#gen::<f64>() - 0.5) * IMPULSE_STRENGTH * force_scale;
			self.vy += (rng.r#gen::<f64>() - 0.5) * IMPULSE_STRENGTH * force_scale;
		}

		self.vx *= config.friction;
		self.vy *= config.friction;

		let speed = self.speed();
		if speed > config.speed_limit {
			self.vx = self.vx / speed * config.speed_limit;
			self.vy = self.vy / speed * config.speed_limit;
		}

		self.x += self.vx;
		self.y += self.vy;

		self.history.push_back(self.position());
		while self.history.len() > self.history_capacity {
			self.history.pop_front();
		}

		if self.wrap(viewport, config.wrap_margin) {
			self.history.clear();
		}
	}

	fn apply_ring_force(&mut self, center: Point, force_scale: f64) {
		let (dx, dy) = (self.x - center.x, self.y - center.y);
		let dist = (dx * dx + dy * dy).sqrt();
		let angle = dy.atan2(dx);

		if dist < self.circle_radius * INNER_RING {
			let push = PUSH_STRENGTH * force_scale;
			self.vx += angle.cos() * push;
			self.vy += angle.sin() * push;
		} else if dist > self.circle_radius * OUTER_RING {
			let pull = PULL_STRENGTH * force_scale;
			self.vx -= angle.cos() * pull;
			self.vy -= angle.sin() * pull;
		}
	}

	fn apply_wander(&mut self, center: Point, force_scale: f64) {
		self.wander_angle += self.wander_speed;
		let target = self.wander_target(center);
		let (tx, ty) = (target.x - self.x, target.y - self.y);
		let dist = (tx * tx + ty * ty).sqrt();

		if dist > self.wander_radius {
			let pull = WANDER_PULL * force_scale;
			self.vx += tx / dist * pull;
			self.vy += ty / dist * pull;
		} else {
			let spring = WANDER_SPRING * force_scale;
			self.vx += tx * spring;
			self.vy += ty * spring;
		}
	}

	/// Toroidal wrap with `margin` outside the canvas. Returns whether it wrapped.
	fn wrap(&mut self, viewport: &ViewportState, margin: f64) -> bool {
		let mut wrapped = false;
		if self.x < -margin {
			self.x = viewport.width + margin;
			wrapped = true;
		} else if self.x > viewport.width + margin {
			self.x = -margin;
			wrapped = true;
		}
		if self.y < -margin {
			self.y = viewport.height + margin;
			wrapped = true;
		} else if self.y > viewport.height + margin {
			self.y = -margin;
			wrapped = true;
		}
		wrapped
	}

	/// Trail through the recent positions, or a dot when there is no trail yet.
	pub fn draw<S: Surface>(&self, surface: &mut S, alpha: f64) {
		if self.history.len() > 1 {
			surface.stroke_polyline(self.history.iter().copied(), self.color, alpha, self.size);
		} else {
			surface.fill_disc(self.position(), self.size, self.color, alpha);
		}
	}
}

/// The whole population. Rebuilt from scratch on every resize.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
	particles: Vec<Particle>,
}

impl ParticleSystem {
	pub fn new<R: Rng + ?Sized>(
		count: usize,
		viewport: &ViewportState,
		palette: &ColorPalette,
		trail_length: usize,
		rng: &mut R,
	) -> Self {
		let mut system = Self::default();
		system.reinitialize(count, viewport, palette, trail_length, rng);
		system
	}

	/// Discard every particle and place a fresh population.
	pub fn reinitialize<R: Rng + ?Sized>(
		&mut self,
		count: usize,
		viewport: &ViewportState,
		palette: &ColorPalette,
		trail_length: usize,
		rng: &mut R,
	) {
		self.particles = (0..count)
			.map(|i| Particle::new(i, count, viewport, palette, trail_length, rng))
			.collect();
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn update<R: Rng + ?Sized>(
		&mut self,
		attractor: Attractor,
		viewport: &ViewportState,
		config: &SimulationConfig,
		rng: &mut R,
	) {
		for p in &mut self.particles {
			p.update(attractor, viewport, config, rng);
		}
	}

	pub fn draw<S: Surface>(&self, surface: &mut S, alpha: f64) {
		for p in &self.particles {
			p.draw(surface, alpha);
		}
	}

	/// Update then draw every particle, in index order.
	pub fn tick<R: Rng + ?Sized, S: Surface>(
		&mut self,
		attractor: Attractor,
		viewport: &ViewportState,
		config: &SimulationConfig,
		rng: &mut R,
		surface: &mut S,
	) {
		for p in &mut self.particles {
			p.update(attractor, viewport, config, rng);
			p.draw(surface, config.alpha);
		}
	}
}
