//! Particle Field entry point
//!
//! On the web this starts the page. On native it runs a headless preview of
//! the field against an in-memory surface and prints per-phase summaries.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    particle_field::platform::web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use std::cell::RefCell;
    use std::rc::Rc;

    use particle_field::platform::{ManualScheduler, run_loop};
    use particle_field::renderer::FrameSummary;
    use particle_field::settings::ConfigError;
    use particle_field::{FieldAnimator, FieldConfig, RecordingSurface};
    use serde::Serialize;

    const FRAMES_PER_PHASE: u32 = 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Serialize)]
    struct PhaseReport<'a> {
        phase: &'a str,
        width: f32,
        height: f32,
        frames: u32,
        last_frame: FrameSummary,
    }

    fn load_config(path: Option<String>) -> Result<FieldConfig, Box<dyn std::error::Error>> {
        let Some(path) = path else {
            return Ok(FieldConfig::default());
        };
        let json = std::fs::read_to_string(&path)?;
        let config = FieldConfig::from_json(&json).map_err(|e: ConfigError| {
            log::error!("Bad config {}: {}", path, e);
            e
        })?;
        log::info!("Loaded config from {}", path);
        Ok(config)
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_config(std::env::args().nth(1))?;
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let animator = Rc::new(RefCell::new(FieldAnimator::new(
            config,
            RecordingSurface::new(800.0, 600.0),
            seed,
        )?));
        let scheduler = ManualScheduler::new();
        run_loop(animator.clone(), scheduler.clone());

        let mut clock = 0.0;
        let phases: [(&str, Option<(f32, f32)>, Option<(f32, f32)>); 3] = [
            ("idle", None, None),
            ("cursor", None, Some((400.0, 300.0))),
            ("resized", Some((400.0, 300.0)), None),
        ];
        for (phase, resize, cursor) in phases {
            {
                let mut a = animator.borrow_mut();
                if let Some((w, h)) = resize {
                    a.resize(w, h);
                }
                match cursor {
                    Some((x, y)) => a.pointer_move(x, y),
                    None => a.pointer_leave(),
                }
            }
            let frames = scheduler.run_frames(FRAMES_PER_PHASE, clock, FRAME_MS);
            clock += frames as f64 * FRAME_MS;

            let a = animator.borrow();
            let bounds = a.state().bounds;
            let report = PhaseReport {
                phase,
                width: bounds.x,
                height: bounds.y,
                frames,
                last_frame: a.last_frame(),
            };
            println!("{}", serde_json::to_string(&report)?);
        }

        log::info!(
            "Preview finished after {} frames",
            animator.borrow().stats().frames
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Particle Field (native preview) starting...");
    log::info!("The page itself runs in the browser - build for wasm32 with `trunk serve`");

    if let Err(e) = preview::run() {
        log::error!("Preview failed: {}", e);
        std::process::exit(1);
    }
}
