//! Browser platform: canvas 2D surface, requestAnimationFrame loop, events

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::{FrameCallback, FrameScheduler, run_loop};
use crate::animator::FieldAnimator;
use crate::page;
use crate::renderer::{Rgba, Surface};
use crate::settings::FieldConfig;

/// Id of the background canvas element
pub const CANVAS_ID: &str = "particle-canvas";
/// Optional JSON `FieldConfig` on the canvas element
pub const CONFIG_ATTRIBUTE: &str = "data-config";

/// Canvas element plus its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.ctx
            .clear_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Rgba) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.set_fill_style_str(&fill.to_string());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Rgba, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&stroke.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}

/// `requestAnimationFrame`-backed scheduler
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) {
        let closure = Closure::once(move |time: f64| callback(time));
        if let Err(e) = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {:?}", e);
            return;
        }
        closure.forget();
    }
}

fn viewport_size(window: &Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

fn load_config(canvas: &HtmlCanvasElement) -> FieldConfig {
    match canvas.get_attribute(CONFIG_ATTRIBUTE) {
        Some(json) => FieldConfig::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring {}: {}", CONFIG_ATTRIBUTE, e);
            FieldConfig::default()
        }),
        None => FieldConfig::default(),
    }
}

type SharedAnimator = Rc<RefCell<FieldAnimator<CanvasSurface>>>;

fn wire_field_events(window: &Window, animator: &SharedAnimator) -> Result<(), JsValue> {
    // Resize: full regeneration at the new viewport size
    {
        let animator = animator.clone();
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = viewport_size(&window_clone);
            animator.borrow_mut().resize(w, h);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer move: raw client coordinates
    {
        let animator = animator.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            animator
                .borrow_mut()
                .pointer_move(event.client_x() as f32, event.client_y() as f32);
        });
        window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Pointer leaving the window (no element it moved onto)
    {
        let animator = animator.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if event.related_target().is_none() {
                animator.borrow_mut().pointer_leave();
            }
        });
        window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Page start-up: particle field on the background canvas, then the nav bar
/// and scroll reveal. A missing window, document, canvas or 2D context is
/// fatal and surfaces as a thrown error.
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }

    log::info!("Particle field starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| {
            log::error!("Missing #{}", CANVAS_ID);
            JsValue::from_str("missing particle canvas")
        })?
        .dyn_into()?;

    let config = load_config(&canvas);
    let mut surface = CanvasSurface::new(canvas)?;
    let (w, h) = viewport_size(&window);
    surface.resize(w, h);

    let seed = js_sys::Date::now() as u64;
    let animator = FieldAnimator::new(config, surface, seed).map_err(|e| {
        log::error!("Particle field config rejected: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    let animator = Rc::new(RefCell::new(animator));

    wire_field_events(&window, &animator)?;
    run_loop(animator, RafScheduler::new(window.clone()));

    page::nav::wire(&window, &document)?;
    page::reveal::wire(&window, &document)?;

    log::info!("Particle field running!");
    Ok(())
}
