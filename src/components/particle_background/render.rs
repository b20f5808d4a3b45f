//! Drawing of the particle field.
//!
//! The simulation draws through [`Surface`] so it can be rendered to a
//! `CanvasRenderingContext2d` in the browser or recorded in tests.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::dom::warn_on_err;
use super::palette::Rgb;
use super::types::Point;

/// Minimal 2D drawing target.
pub trait Surface {
	/// Clear the whole visible area.
	fn clear(&mut self, width: f64, height: f64);
	/// Stroke a connected polyline with round caps.
	fn stroke_polyline<I>(&mut self, points: I, color: Rgb, alpha: f64, width: f64)
	where
		I: IntoIterator<Item = Point>;
	/// Fill a disc.
	fn fill_disc(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn stroke_polyline<I>(&mut self, points: I, color: Rgb, alpha: f64, width: f64)
	where
		I: IntoIterator<Item = Point>,
	{
		let mut points = points.into_iter();
		let Some(first) = points.next() else {
			return;
		};

		self.begin_path();
		self.set_stroke_style_str(&color.to_css_rgba(alpha));
		self.set_line_width(width);
		self.set_line_cap("round");
		self.move_to(first.x, first.y);
		for p in points {
			self.line_to(p.x, p.y);
		}
		self.stroke();
	}

	fn fill_disc(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64) {
		self.set_fill_style_str(&color.to_css_rgba(alpha));
		self.begin_path();
		warn_on_err("arc", self.arc(center.x, center.y, radius, 0.0, PI * 2.0));
		self.fill();
	}
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	/// A drawing command captured by [`RecordingSurface`].
	#[derive(Clone, Debug, PartialEq)]
	pub enum Command {
		Clear,
		Polyline {
			points: Vec<Point>,
			color: Rgb,
			alpha: f64,
			width: f64,
		},
		Disc {
			center: Point,
			radius: f64,
			color: Rgb,
			alpha: f64,
		},
	}

	#[derive(Default)]
	pub struct RecordingSurface {
		pub commands: Vec<Command>,
	}

	impl Surface for RecordingSurface {
		fn clear(&mut self, _width: f64, _height: f64) {
			self.commands.push(Command::Clear);
		}

		fn stroke_polyline<I>(&mut self, points: I, color: Rgb, alpha: f64, width: f64)
		where
			I: IntoIterator<Item = Point>,
		{
			self.commands.push(Command::Polyline {
				points: points.into_iter().collect(),
				color,
				alpha,
				width,
			});
		}

		fn fill_disc(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64) {
			self.commands.push(Command::Disc {
				center,
				radius,
				color,
				alpha,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::recording::{Command, RecordingSurface};
	use crate::components::particle_background::center::Attractor;
	use crate::components::particle_background::config::SimulationConfig;
	use crate::components::particle_background::input::ViewportState;
	use crate::components::particle_background::palette::PALETTES;
	use crate::components::particle_background::particles::ParticleSystem;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn fresh_particles_draw_as_dots_then_trails() {
		let mut rng = SmallRng::seed_from_u64(5);
		let config = SimulationConfig::default();
		let viewport = ViewportState::new(400.0, 300.0);
		let mut system =
			ParticleSystem::new(4, &viewport, &PALETTES[0], config.trail_length, &mut rng);

		let mut surface = RecordingSurface::default();
		system.draw(&mut surface, config.alpha);
		assert_eq!(surface.commands.len(), 4);
		assert!(
			surface
				.commands
				.iter()
				.all(|c| matches!(c, Command::Disc { alpha, .. } if *alpha == 0.8))
		);

		let attractor = Attractor {
			center: viewport.center(),
			force_scale: 1.0,
		};
		for _ in 0..3 {
			system.update(attractor, &viewport, &config, &mut rng);
		}

		let mut surface = RecordingSurface::default();
		system.draw(&mut surface, config.alpha);
		for (cmd, p) in surface.commands.iter().zip(system.particles()) {
			match cmd {
				Command::Polyline { points, color, width, .. } => {
					assert_eq!(points.len(), p.history.len());
					assert_eq!(*color, p.color);
					assert_eq!(*width, p.size);
				}
				// A particle that wrapped this frame has an empty trail
				Command::Disc { radius, .. } => assert_eq!(*radius, p.size),
				Command::Clear => panic!("unexpected clear"),
			}
		}
	}
}
