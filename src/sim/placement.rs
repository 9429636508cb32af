//! Plant placement by rejection sampling
//!
//! Pure and seedable so layouts can be tested without a screen.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use crate::sample_range;

/// Pick `count` positions inside `bounds`, each at least `min_distance` from
/// the ones before it. A plant gets `attempts` tries; if none satisfy the
/// spacing the last candidate is kept, so the result always has `count`
/// entries.
pub fn place_plants<R: Rng + ?Sized>(
    count: usize,
    bounds: Rect,
    min_distance: f32,
    attempts: u32,
    rng: &mut R,
) -> Vec<Vec2> {
    let mut placed: Vec<Vec2> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut candidate = random_point(&bounds, rng);
        for _ in 1..attempts.max(1) {
            if is_spaced(&placed, candidate, min_distance) {
                break;
            }
            candidate = random_point(&bounds, rng);
        }
        placed.push(candidate);
    }

    placed
}

fn random_point<R: Rng + ?Sized>(bounds: &Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        sample_range(rng, bounds.min.x, bounds.max.x),
        sample_range(rng, bounds.min.y, bounds.max.y),
    )
}

fn is_spaced(placed: &[Vec2], candidate: Vec2, min_distance: f32) -> bool {
    placed
        .iter()
        .all(|p| p.distance(candidate) >= min_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn garden() -> Rect {
        Rect::new(Vec2::new(80.0, 360.0), Vec2::new(720.0, 980.0))
    }

    #[test]
    fn test_spacing_respected_when_room_allows() {
        let mut rng = Pcg32::seed_from_u64(7);
        let positions = place_plants(5, garden(), 120.0, 50, &mut rng);
        assert_eq!(positions.len(), 5);

        for (i, a) in positions.iter().enumerate() {
            assert!(garden().contains(*a));
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) >= 120.0, "{a} too close to {b}");
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = place_plants(5, garden(), 120.0, 50, &mut Pcg32::seed_from_u64(42));
        let b = place_plants(5, garden(), 120.0, 50, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_crowded_area_still_places_everything() {
        // Impossible spacing: falls back to the last candidate
        let tiny = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let mut rng = Pcg32::seed_from_u64(1);
        let positions = place_plants(4, tiny, 500.0, 50, &mut rng);
        assert_eq!(positions.len(), 4);
        assert!(positions.iter().all(|p| tiny.contains(*p)));
    }

    #[test]
    fn test_degenerate_bounds() {
        let line = Rect::new(Vec2::new(50.0, 50.0), Vec2::new(50.0, 50.0));
        let mut rng = Pcg32::seed_from_u64(3);
        let positions = place_plants(2, line, 10.0, 5, &mut rng);
        assert_eq!(positions, vec![Vec2::new(50.0, 50.0); 2]);
    }
}
