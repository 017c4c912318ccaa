//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual stepping on host)
//! - The canvas surface and input/resize events (`web`, wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

use crate::animator::FieldAnimator;
use crate::renderer::Surface;

/// Callback run on the next frame with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host hook that runs a callback once, at the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback);
}

/// Drive `animator` one frame per scheduler tick, re-arming after each frame.
///
/// There is no stop: the loop lives as long as the scheduler keeps firing.
pub fn run_loop<S, F>(animator: Rc<RefCell<FieldAnimator<S>>>, scheduler: F)
where
    S: Surface + 'static,
    F: FrameScheduler + Clone + 'static,
{
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |time| {
        animator.borrow_mut().frame(time);
        run_loop(animator, next);
    }));
}

/// Scheduler that holds the pending callback until [`ManualScheduler::advance`]
#[derive(Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<RefCell<Option<FrameCallback>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Fire the pending callback, if any. Returns whether a frame ran.
    pub fn advance(&self, time: f64) -> bool {
        // Take before calling: the callback re-arms through `request_frame`
        let callback = self.pending.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback(time);
                true
            }
            None => false,
        }
    }

    /// Advance `frames` times at a fixed interval starting after `start`
    pub fn run_frames(&self, frames: u32, start: f64, interval: f64) -> u32 {
        (1..=frames)
            .take_while(|&i| self.advance(start + i as f64 * interval))
            .count() as u32
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        let replaced = self.pending.borrow_mut().replace(callback);
        if replaced.is_some() {
            log::warn!("Frame requested twice before it ran; dropping the older callback");
        }
    }
}
