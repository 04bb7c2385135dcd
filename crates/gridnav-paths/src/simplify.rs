//! Waypoint simplification.

use glam::Vec3;

/// Collapse runs of collinear waypoints, keeping only the points where the
/// step direction changes plus the final point.
///
/// The previous direction starts at zero, so the first point always counts
/// as a direction change: a straight line reduces to `[start, goal]` and a
/// single point passes through unchanged.
pub fn simplify(points: &[Vec3]) -> Vec<Vec3> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut waypoints = Vec::new();
    let mut old_direction = Vec3::ZERO;
    for i in 1..points.len() {
        let direction = points[i] - points[i - 1];
        if direction != old_direction {
            waypoints.push(points[i - 1]);
        }
        old_direction = direction;
    }
    waypoints.push(points[points.len() - 1]);
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, z: f32) -> Vec3 {
        Vec3::new(x, 0.0, z)
    }

    #[test]
    fn empty_and_single_pass_through() {
        assert!(simplify(&[]).is_empty());
        assert_eq!(simplify(&[p(1.0, 1.0)]), vec![p(1.0, 1.0)]);
    }

    #[test]
    fn straight_line_collapses_to_endpoints() {
        let line = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)];
        assert_eq!(simplify(&line), vec![p(0.0, 0.0), p(3.0, 0.0)]);
    }

    #[test]
    fn corner_survives() {
        let bend = vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
        ];
        assert_eq!(
            simplify(&bend),
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)]
        );
    }

    #[test]
    fn zigzag_keeps_every_turn() {
        let zigzag = vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(2.0, 1.0),
            p(2.0, 2.0),
        ];
        assert_eq!(simplify(&zigzag), zigzag);
    }

    #[test]
    fn two_points_stay_two_points() {
        let pair = vec![p(0.0, 0.0), p(0.0, 1.0)];
        assert_eq!(simplify(&pair), pair);
    }
}
