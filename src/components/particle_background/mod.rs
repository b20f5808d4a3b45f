//! Ambient particle field rendered behind the panel.
//!
//! A few hundred points orbit a shared attractor on a canvas that sits under
//! the panel UI:
//! - Golden-angle placement with a square-root radius distribution
//! - Dead-zone ring spring plus a bounded local wander per particle
//! - Attractor follows the pointer, except over the header, and otherwise
//!   glides between random waypoints
//! - A short protection window after mount and resize keeps the field centered
//! - Resizes rebuild the field behind a debounced fade
//!
//! The simulation ([`SimulationContext`]) is independent of the DOM; the
//! [`ParticleBackground`] component wires it to a canvas, window events and
//! `requestAnimationFrame`.
//!
//! # Example
//!
//! ```ignore
//! use panel_particles::{MountOptions, ParticleBackground};
//!
//! view! { <ParticleBackground options=MountOptions::default() /> }
//! ```

mod animation;
pub mod center;
mod component;
pub mod config;
mod dom;
pub mod input;
pub mod palette;
pub mod particles;
pub mod render;
pub mod state;
mod types;

pub use component::ParticleBackground;
pub use config::SimulationConfig;
pub use state::SimulationContext;
pub use types::{MountOptions, Point, Rect};
