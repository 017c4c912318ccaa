//! Particle Field - an animated canvas background for a static page
//!
//! Core modules:
//! - `sim`: Particle simulation (regeneration, motion, cursor repulsion, links)
//! - `renderer`: Drawing surface abstraction and frame rendering
//! - `animator`: The controller that owns one field and its surface
//! - `platform`: Frame scheduling and browser wiring
//! - `page`: Navigation bar and scroll reveal controllers
//! - `settings`: Data-driven field configuration

pub mod animator;
pub mod page;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use animator::{FieldAnimator, FrameStats};
pub use renderer::{RecordingSurface, Rgba, Surface};
pub use settings::{ConfigError, Density, FieldConfig, Rgb};

/// Fixed field constants (not configurable)
pub mod consts {
    /// Per-particle opacity is drawn uniformly from this range
    pub const OPACITY_MIN: f32 = 0.3;
    pub const OPACITY_MAX: f32 = 0.8;

    /// Scale applied to the cursor push each frame
    pub const REPULSION_STRENGTH: f32 = 0.5;

    /// Frames between debug FPS reports
    pub const STATS_LOG_INTERVAL: u64 = 600;

    /// Number of frame timestamps kept for FPS
    pub const FPS_WINDOW: usize = 60;
}
