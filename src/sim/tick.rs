//! Per-frame particle update
//!
//! Advances every particle by one display frame: edge reflection, motion,
//! then the cursor push. Rendering happens afterwards in `renderer`.

use glam::Vec2;

use super::state::{Cursor, FieldState, Particle};
use crate::consts::REPULSION_STRENGTH;

/// Advance the whole field by one frame
pub fn tick(state: &mut FieldState) {
    let bounds = state.bounds;
    let cursor = state.cursor;
    for particle in &mut state.particles {
        step_particle(particle, bounds, &cursor);
    }
}

/// Update a single particle in place
pub fn step_particle(particle: &mut Particle, bounds: Vec2, cursor: &Cursor) {
    reflect_edges(particle, bounds);
    particle.pos += particle.vel;
    if let Some(push) = repulsion(particle.pos, cursor) {
        particle.pos += push;
    }
}

/// Point the velocity back inside on any axis where the particle has left
/// `[0, bounds]`. Position is left untouched.
pub fn reflect_edges(particle: &mut Particle, bounds: Vec2) {
    if particle.pos.x < 0.0 {
        particle.vel.x = particle.vel.x.abs();
    } else if particle.pos.x > bounds.x {
        particle.vel.x = -particle.vel.x.abs();
    }
    if particle.pos.y < 0.0 {
        particle.vel.y = particle.vel.y.abs();
    } else if particle.pos.y > bounds.y {
        particle.vel.y = -particle.vel.y.abs();
    }
}

/// Displacement pushing `pos` away from the cursor this frame, if in reach
pub fn repulsion(pos: Vec2, cursor: &Cursor) -> Option<Vec2> {
    let (center, distance) = cursor.reach(pos)?;
    let away = (pos - center).normalize_or_zero();
    if away == Vec2::ZERO {
        return None;
    }
    let force = (cursor.radius - distance) / cursor.radius;
    Some(away * force * REPULSION_STRENGTH)
}
