//! UI components.

pub mod particle_background;
