//! Field controller
//!
//! [`FieldAnimator`] owns one particle field, its configuration and the
//! surface it draws on. Event handlers and the frame callback all go through
//! it; nothing is global, so several animators can run side by side.

use glam::Vec2;

use crate::consts::{FPS_WINDOW, STATS_LOG_INTERVAL};
use crate::renderer::{FrameSummary, Surface, draw_frame};
use crate::settings::{ConfigError, FieldConfig};
use crate::sim::{FieldState, tick};

/// Rolling frames-per-second estimate from frame timestamps (ms)
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    pub frames: u64,
    pub fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    pub fn record(&mut self, time: f64) {
        self.frames += 1;
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot we'll overwrite next holds the oldest sample, FPS_WINDOW - 1 frames back
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (((FPS_WINDOW - 1) as f64 * 1000.0) / elapsed).round() as u32;
            }
        }
    }
}

pub struct FieldAnimator<S> {
    config: FieldConfig,
    state: FieldState,
    surface: S,
    stats: FrameStats,
    last_frame: FrameSummary,
}

impl<S: Surface> FieldAnimator<S> {
    /// Build an animator sized to the surface's current dimensions.
    /// Fails if the configuration does not validate.
    pub fn new(config: FieldConfig, surface: S, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = surface.size();
        let mut animator = Self {
            state: FieldState::new(seed, config.cursor_radius),
            config,
            surface,
            stats: FrameStats::default(),
            last_frame: FrameSummary::default(),
        };
        animator.init(size.x, size.y);
        log::info!(
            "Particle field ready: {} particles, seed {}",
            animator.state.particles.len(),
            seed
        );
        Ok(animator)
    }

    /// Size the surface to the viewport and regenerate every particle
    pub fn init(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
        self.state.regenerate(width, height, &self.config);
    }

    /// Viewport resize: a full reset, positions are not preserved
    pub fn resize(&mut self, width: f32, height: f32) {
        log::info!("Viewport resized to {}x{}, regenerating field", width, height);
        self.init(width, height);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.state.cursor.set(Vec2::new(x, y));
    }

    pub fn pointer_leave(&mut self) {
        self.state.cursor.clear();
    }

    /// Run one display frame: move, then redraw everything
    pub fn frame(&mut self, time: f64) -> FrameSummary {
        tick(&mut self.state);
        self.last_frame = draw_frame(&self.state, &self.config, &mut self.surface);
        self.stats.record(time);

        log::trace!(
            "frame {}: {} links, {} cursor links",
            self.stats.frames,
            self.last_frame.links,
            self.last_frame.cursor_links
        );
        if self.stats.frames % STATS_LOG_INTERVAL == 0 {
            log::debug!("{} frames, {} fps", self.stats.frames, self.stats.fps);
        }
        self.last_frame
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    /// Direct access for placing particles by hand
    pub fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn last_frame(&self) -> FrameSummary {
        self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};
    use crate::sim::Particle;

    fn animator(count: usize) -> FieldAnimator<RecordingSurface> {
        FieldAnimator::new(
            FieldConfig::with_count(count),
            RecordingSurface::new(800.0, 600.0),
            12345,
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_unusable_config() {
        let infinite = FieldConfig {
            size_max: f32::INFINITY,
            ..FieldConfig::default()
        };
        assert!(matches!(
            FieldAnimator::new(infinite, RecordingSurface::new(800.0, 600.0), 1),
            Err(ConfigError::NotFinite { name: "size_max", .. })
        ));

        let inverted = FieldConfig {
            size_min: 3.0,
            size_max: 1.0,
            ..FieldConfig::default()
        };
        assert!(matches!(
            FieldAnimator::new(inverted, RecordingSurface::new(800.0, 600.0), 1),
            Err(ConfigError::SizeRange { .. })
        ));
    }

    #[test]
    fn test_new_sizes_and_seeds_field() {
        let a = animator(30);
        assert_eq!(a.state().particles.len(), 30);
        assert_eq!(a.state().bounds, Vec2::new(800.0, 600.0));
        assert_eq!(a.surface().size(), Vec2::new(800.0, 600.0));
        assert_eq!(a.state().cursor.pos, None);
    }

    #[test]
    fn test_resize_resets_field() {
        let mut a = animator(30);
        a.resize(400.0, 300.0);
        assert_eq!(a.state().generation, 2);
        assert_eq!(a.state().particles.len(), 30);
        assert_eq!(a.surface().size(), Vec2::new(400.0, 300.0));
        assert!(
            a.state()
                .particles
                .iter()
                .all(|p| p.pos.x <= 400.0 && p.pos.y <= 300.0)
        );
    }

    #[test]
    fn test_pointer_leave_stops_cursor_effects_next_frame() {
        let mut a = animator(0);
        a.state_mut().particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            size: 2.0,
            opacity: 0.5,
        });

        a.pointer_move(110.0, 100.0);
        let summary = a.frame(16.0);
        assert_eq!(summary.cursor_links, 1);
        assert!(a.state().particles[0].pos.x < 100.0);

        a.pointer_leave();
        let before = a.state().particles[0].pos;
        let summary = a.frame(32.0);
        assert_eq!(summary.cursor_links, 0);
        assert_eq!(a.state().particles[0].pos, before);
        assert_eq!(a.surface().lines().count(), 0);
    }

    #[test]
    fn test_frame_redraws_from_a_clear() {
        let mut a = animator(10);
        a.frame(16.0);
        a.frame(32.0);
        let calls = &a.surface().calls;
        assert!(matches!(calls[0], DrawCall::Clear { .. }));
        assert_eq!(a.surface().circles().count(), 10);
        assert_eq!(a.stats().frames, 2);
    }

    #[test]
    fn test_fps_estimate() {
        let mut stats = FrameStats::default();
        for i in 1..=(FPS_WINDOW as u64 * 2) {
            stats.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(stats.fps, 60);
    }
}
