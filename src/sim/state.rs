//! Field state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{OPACITY_MAX, OPACITY_MIN};
use crate::settings::FieldConfig;

/// A single moving point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radius in pixels, fixed for the particle's lifetime
    pub size: f32,
    /// Fill alpha, fixed for the particle's lifetime
    pub opacity: f32,
}

impl Particle {
    /// Draw a particle with randomized state inside `bounds`
    pub fn random(rng: &mut impl Rng, bounds: Vec2, config: &FieldConfig) -> Self {
        let half_speed = config.speed_scale / 2.0;
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..=bounds.x),
                rng.random_range(0.0..=bounds.y),
            ),
            vel: Vec2::new(
                rng.random_range(-half_speed..=half_speed),
                rng.random_range(-half_speed..=half_speed),
            ),
            size: rng.random_range(config.size_min..=config.size_max),
            opacity: rng.random_range(OPACITY_MIN..=OPACITY_MAX),
        }
    }
}

/// Pointer position (if any) plus the fixed interaction radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub pos: Option<Vec2>,
    pub radius: f32,
}

impl Cursor {
    pub fn new(radius: f32) -> Self {
        Self { pos: None, radius }
    }

    pub fn set(&mut self, pos: Vec2) {
        self.pos = Some(pos);
    }

    pub fn clear(&mut self) {
        self.pos = None;
    }

    /// Cursor position and distance to `point`, if present and within radius
    pub fn reach(&self, point: Vec2) -> Option<(Vec2, f32)> {
        let pos = self.pos?;
        let distance = pos.distance(point);
        (distance < self.radius).then_some((pos, distance))
    }
}

/// Everything one field mutates frame to frame
#[derive(Debug, Clone)]
pub struct FieldState {
    pub particles: Vec<Particle>,
    pub cursor: Cursor,
    /// Surface width and height
    pub bounds: Vec2,
    /// Number of regenerations so far
    pub generation: u32,
    rng: Pcg32,
}

impl FieldState {
    /// Empty field; call [`FieldState::regenerate`] to populate it
    pub fn new(seed: u64, cursor_radius: f32) -> Self {
        Self {
            particles: Vec::new(),
            cursor: Cursor::new(cursor_radius),
            bounds: Vec2::ZERO,
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Discard the current set and draw `config.particle_count()` fresh particles
    pub fn regenerate(&mut self, width: f32, height: f32, config: &FieldConfig) {
        self.bounds = Vec2::new(width.max(0.0), height.max(0.0));
        let bounds = self.bounds;
        let rng = &mut self.rng;
        self.particles = (0..config.particle_count())
            .map(|_| Particle::random(rng, bounds, config))
            .collect();
        self.generation += 1;
        log::debug!(
            "Regenerated {} particles for {}x{} (generation {})",
            self.particles.len(),
            width,
            height,
            self.generation
        );
    }
}
