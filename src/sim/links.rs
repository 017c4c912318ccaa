//! Proximity links between particles and to the cursor
//!
//! A link exists iff the distance is strictly below the threshold; its
//! strength falls linearly from 1 at distance 0 to 0 at the threshold.

use glam::Vec2;

use super::state::{Cursor, Particle};

/// A visible connection from one particle to another point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first particle
    pub a: usize,
    /// Index of the second particle (`None` for a cursor link)
    pub b: Option<usize>,
    pub from: Vec2,
    pub to: Vec2,
    pub distance: f32,
    /// `1 - distance / threshold`, in (0, 1]
    pub strength: f32,
}

/// Linear falloff, or `None` at or beyond the threshold
#[inline]
pub fn falloff(distance: f32, threshold: f32) -> Option<f32> {
    (distance < threshold).then(|| 1.0 - distance / threshold)
}

/// All unordered particle pairs (i < j) closer than `threshold`
pub fn particle_links(particles: &[Particle], threshold: f32) -> Vec<Link> {
    let mut links = Vec::new();
    for (i, p) in particles.iter().enumerate() {
        for (j, q) in particles.iter().enumerate().skip(i + 1) {
            let distance = p.pos.distance(q.pos);
            if let Some(strength) = falloff(distance, threshold) {
                links.push(Link {
                    a: i,
                    b: Some(j),
                    from: p.pos,
                    to: q.pos,
                    distance,
                    strength,
                });
            }
        }
    }
    links
}

/// Links from each particle within the cursor radius to the cursor
pub fn cursor_links(particles: &[Particle], cursor: &Cursor) -> Vec<Link> {
    particles
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let (center, distance) = cursor.reach(p.pos)?;
            Some(Link {
                a: i,
                b: None,
                from: p.pos,
                to: center,
                distance,
                strength: falloff(distance, cursor.radius)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(x: f32, y: f32) -> Particle {
        Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: 1.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_three_particle_scenario() {
        let particles = [at(0.0, 0.0), at(10.0, 0.0), at(1000.0, 1000.0)];
        let links = particle_links(&particles, 150.0);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, Some(1)));
        assert!((links[0].distance - 10.0).abs() < 1e-6);
        assert!((links[0].strength - (1.0 - 10.0 / 150.0)).abs() < 1e-6);
    }

    #[test]
    fn test_threshold_is_strict() {
        let particles = [at(0.0, 0.0), at(150.0, 0.0)];
        assert!(particle_links(&particles, 150.0).is_empty());
        assert_eq!(falloff(150.0, 150.0), None);
        assert_eq!(falloff(0.0, 150.0), Some(1.0));
    }

    #[test]
    fn test_cursor_link_scenario() {
        let mut cursor = Cursor::new(150.0);
        cursor.set(Vec2::new(5.0, 0.0));
        let links = cursor_links(&[at(0.0, 0.0), at(400.0, 0.0)], &cursor);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].b, None);
        assert_eq!(links[0].to, Vec2::new(5.0, 0.0));
        assert!((links[0].strength - (1.0 - 5.0 / 150.0)).abs() < 1e-6);
    }

    #[test]
    fn test_no_cursor_links_when_absent() {
        let cursor = Cursor::new(150.0);
        assert!(cursor_links(&[at(0.0, 0.0), at(1.0, 1.0)], &cursor).is_empty());
    }

    proptest! {
        #[test]
        fn prop_falloff_strictly_decreasing(a in 0.0f32..149.0, delta in 0.01f32..1.0) {
            let b = a + delta;
            let fa = falloff(a, 150.0).unwrap();
            match falloff(b, 150.0) {
                Some(fb) => prop_assert!(fb < fa),
                None => prop_assert!(b >= 150.0),
            }
        }

        #[test]
        fn prop_links_match_pairwise_distance(
            points in prop::collection::vec((0.0f32..500.0, 0.0f32..500.0), 0..30),
        ) {
            let particles: Vec<_> = points.iter().map(|&(x, y)| at(x, y)).collect();
            let links = particle_links(&particles, 150.0);
            let mut expected = 0;
            for i in 0..particles.len() {
                for j in (i + 1)..particles.len() {
                    if particles[i].pos.distance(particles[j].pos) < 150.0 {
                        expected += 1;
                    }
                }
            }
            prop_assert_eq!(links.len(), expected);
            for link in &links {
                prop_assert!(link.b.is_some_and(|b| b > link.a));
                prop_assert!(link.strength > 0.0 && link.strength <= 1.0);
            }
        }
    }
}
