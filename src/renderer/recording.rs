//! In-memory surface that records draw calls
//!
//! Used by tests and by the native headless preview.

use glam::Vec2;

use super::{Rgba, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear {
        origin: Vec2,
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Rgba,
        width: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Vec2,
    /// Calls since the last clear of the full surface
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
    }

    /// Lines stroked at exactly `width`
    pub fn lines_of_width(&self, width: f32) -> usize {
        self.lines()
            .filter(|c| matches!(c, DrawCall::Line { width: w, .. } if *w == width))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.calls.clear();
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        // A full clear starts a new frame; keep only the current one
        if origin == Vec2::ZERO && size == self.size {
            self.calls.clear();
        }
        self.calls.push(DrawCall::Clear { origin, size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            fill,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Rgba, width: f32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            stroke,
            width,
        });
    }
}
