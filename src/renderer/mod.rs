//! 2D rendering
//!
//! The field draws through the [`Surface`] trait: a clearable rectangle that
//! can fill circles and stroke lines. The browser implementation wraps a
//! canvas 2D context (`platform::web`); [`RecordingSurface`] keeps the calls
//! in memory.

pub mod color;
pub mod recording;

pub use color::Rgba;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

use crate::settings::FieldConfig;
use crate::sim::{FieldState, cursor_links, particle_links};

/// A sized 2D drawing target
pub trait Surface {
    fn size(&self) -> Vec2;
    fn resize(&mut self, width: f32, height: f32);
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Rgba, width: f32);
}

/// Counts of what one frame put on the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrameSummary {
    pub particles: usize,
    pub links: usize,
    pub cursor_links: usize,
}

/// Clear the surface and draw particles, particle links, then cursor links
pub fn draw_frame(
    state: &FieldState,
    config: &FieldConfig,
    surface: &mut impl Surface,
) -> FrameSummary {
    let size = surface.size();
    surface.clear_rect(Vec2::ZERO, size);

    for p in &state.particles {
        surface.fill_circle(p.pos, p.size, config.particle_color.with_alpha(p.opacity));
    }

    let link_stroke = config.link_color.with_alpha(config.link_alpha);
    let links = particle_links(&state.particles, config.connection_distance);
    for link in &links {
        surface.stroke_line(
            link.from,
            link.to,
            link_stroke.fade(link.strength),
            config.link_width,
        );
    }

    let cursor_stroke = config.cursor_link_color.with_alpha(config.cursor_link_alpha);
    let to_cursor = cursor_links(&state.particles, &state.cursor);
    for link in &to_cursor {
        surface.stroke_line(
            link.from,
            link.to,
            cursor_stroke.fade(link.strength),
            config.cursor_link_width,
        );
    }

    FrameSummary {
        particles: state.particles.len(),
        links: links.len(),
        cursor_links: to_cursor.len(),
    }
}
