//! Session color palettes.
//!
//! One palette is drawn when the background mounts and every particle takes
//! one of its four colors for its whole lifetime.

use rand::Rng;

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub fn to_css_rgba(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
	}
}

/// A named set of four related colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPalette {
	pub name: &'static str,
	pub colors: [Rgb; 4],
}

/// Palettes a session may be drawn with.
pub static PALETTES: [ColorPalette; 5] = [
	ColorPalette {
		name: "sky",
		colors: [
			Rgb::new(100, 150, 255),
			Rgb::new(50, 100, 240),
			Rgb::new(150, 200, 255),
			Rgb::new(80, 220, 255),
		],
	},
	ColorPalette {
		name: "mint",
		colors: [
			Rgb::new(45, 231, 158),  // #2DE79E
			Rgb::new(80, 255, 200),  // lighter
			Rgb::new(20, 180, 120),  // darker
			Rgb::new(100, 255, 220), // lightest
		],
	},
	ColorPalette {
		name: "indigo",
		colors: [
			Rgb::new(84, 102, 234), // #5466EA
			Rgb::new(120, 140, 255),
			Rgb::new(50, 65, 200),
			Rgb::new(150, 170, 255),
		],
	},
	ColorPalette {
		name: "violet",
		colors: [
			Rgb::new(121, 86, 178), // #7956B2
			Rgb::new(150, 110, 220),
			Rgb::new(90, 65, 140),
			Rgb::new(180, 140, 240),
		],
	},
	// Blends of the four base hues above
	ColorPalette {
		name: "blend",
		colors: [
			Rgb::new(73, 191, 207),
			Rgb::new(65, 167, 196),
			Rgb::new(103, 94, 206),
			Rgb::new(88, 142, 206),
		],
	},
];

impl ColorPalette {
	/// Draw the palette for this session.
	pub fn select<R: Rng + ?Sized>(rng: &mut R) -> &'static ColorPalette {
		&PALETTES[rng.gen_range(0..PALETTES.len())]
	}

	/// Draw one color from the palette.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
		self.colors[rng.gen_range(0..self.colors.len())]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn select_covers_every_palette() {
		let mut rng = SmallRng::seed_from_u64(11);
		let mut seen = vec![false; PALETTES.len()];
		for _ in 0..500 {
			let palette = ColorPalette::select(&mut rng);
			let idx = PALETTES.iter().position(|p| p == palette).unwrap();
			seen[idx] = true;
		}
		assert!(seen.iter().all(|s| *s));
	}

	#[test]
	fn pick_stays_inside_palette() {
		let mut rng = SmallRng::seed_from_u64(3);
		let palette = &PALETTES[1];
		for _ in 0..100 {
			assert!(palette.colors.contains(&palette.pick(&mut rng)));
		}
	}

	#[test]
	fn css_rgba_format() {
		assert_eq!(Rgb::new(45, 231, 158).to_css_rgba(0.8), "rgba(45, 231, 158, 0.8)");
	}
}
