// End-to-end field behaviour through the public API, stepped with the manual
// scheduler instead of real display refreshes.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use particle_field::platform::{ManualScheduler, run_loop};
use particle_field::renderer::DrawCall;
use particle_field::sim::Particle;
use particle_field::{FieldAnimator, FieldConfig, RecordingSurface};

fn still(x: f32, y: f32) -> Particle {
    Particle {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        size: 1.5,
        opacity: 0.5,
    }
}

fn field(count: usize, w: f32, h: f32) -> Rc<RefCell<FieldAnimator<RecordingSurface>>> {
    let animator = FieldAnimator::new(
        FieldConfig::with_count(count),
        RecordingSurface::new(w, h),
        2024,
    )
    .unwrap();
    Rc::new(RefCell::new(animator))
}

#[test]
fn three_particles_link_only_the_close_pair() {
    let animator = field(3, 2000.0, 2000.0);
    animator.borrow_mut().state_mut().particles =
        vec![still(0.0, 0.0), still(10.0, 0.0), still(1000.0, 1000.0)];

    let scheduler = ManualScheduler::new();
    run_loop(animator.clone(), scheduler.clone());
    assert!(scheduler.advance(16.0));

    let a = animator.borrow();
    assert_eq!(a.last_frame().links, 1);
    let lines: Vec<_> = a.surface().lines().collect();
    assert_eq!(lines.len(), 1);
    match lines[0] {
        DrawCall::Line { from, to, .. } => {
            assert_eq!(*from, Vec2::ZERO);
            assert_eq!(*to, Vec2::new(10.0, 0.0));
        }
        other => panic!("unexpected call {other:?}"),
    }
}

#[test]
fn cursor_pushes_particle_away_and_links_to_it() {
    let animator = field(1, 800.0, 600.0);
    {
        let mut a = animator.borrow_mut();
        a.state_mut().particles = vec![still(0.0, 0.0)];
        a.pointer_move(5.0, 0.0);
    }

    let summary = animator.borrow_mut().frame(16.0);
    let a = animator.borrow();
    let p = a.state().particles[0];
    let expected_push = (150.0 - 5.0) / 150.0 * 0.5;
    assert!((p.pos.x + expected_push).abs() < 1e-5);
    assert_eq!(summary.cursor_links, 1);

    // Line drawn from the displaced particle, faded by its new distance
    let d = 5.0 + expected_push;
    let cursor_alpha = a.config().cursor_link_alpha;
    let stroke = a
        .surface()
        .lines()
        .find_map(|c| match c {
            DrawCall::Line { stroke, width, .. } if *width == a.config().cursor_link_width => {
                Some(*stroke)
            }
            _ => None,
        })
        .expect("cursor line");
    assert!((stroke.a - cursor_alpha * (1.0 - d / 150.0)).abs() < 1e-5);
}

#[test]
fn resize_regenerates_at_configured_count() {
    let animator = field(50, 800.0, 600.0);
    let scheduler = ManualScheduler::new();
    run_loop(animator.clone(), scheduler.clone());
    scheduler.run_frames(5, 0.0, 16.0);

    for (w, h) in [(400.0, 300.0), (1280.0, 720.0), (400.0, 300.0)] {
        animator.borrow_mut().resize(w, h);
        let a = animator.borrow();
        assert_eq!(a.state().particles.len(), 50);
        assert!(
            a.state()
                .particles
                .iter()
                .all(|p| p.pos.x >= 0.0 && p.pos.x <= w && p.pos.y >= 0.0 && p.pos.y <= h)
        );
    }

    // Loop keeps running after resizes
    assert_eq!(scheduler.run_frames(3, 100.0, 16.0), 3);
    assert_eq!(animator.borrow().stats().frames, 8);
    assert_eq!(animator.borrow().surface().circles().count(), 50);
}

#[test]
fn independent_animators_do_not_share_state() {
    let first = field(10, 300.0, 300.0);
    let second = field(10, 300.0, 300.0);
    first.borrow_mut().pointer_move(150.0, 150.0);

    assert!(first.borrow().state().cursor.pos.is_some());
    assert!(second.borrow().state().cursor.pos.is_none());
}
