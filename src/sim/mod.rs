//! Particle simulation module
//!
//! Pure field logic with no rendering or platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - One call to `tick` per display frame

pub mod links;
pub mod state;
pub mod tick;

pub use links::{Link, cursor_links, falloff, particle_links};
pub use state::{Cursor, FieldState, Particle};
pub use tick::{reflect_edges, repulsion, step_particle, tick};
