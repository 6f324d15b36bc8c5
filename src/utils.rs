use crate::types::Pose;
use std::f64::consts::PI;

/// Linear interpolation between two f64 values
pub fn lerp_f64(start: f64, end: f64, alpha: f64) -> f64 {
    start + (end - start) * alpha
}

/// Linear interpolation between two poses, heading included.
pub fn lerp_pose(start: Pose, end: Pose, alpha: f64) -> Pose {
    Pose {
        x: lerp_f64(start.x, end.x, alpha),
        y: lerp_f64(start.y, end.y, alpha),
        heading: angle_lerp(start.heading, end.heading, alpha),
    }
}

/// Angular interpolation (handles wraparound)
/// Takes degrees, converts to radians for math, returns degrees
pub fn angle_lerp(start_deg: f64, end_deg: f64, alpha: f64) -> f64 {
    let start_rad = start_deg.to_radians();
    let end_rad = end_deg.to_radians();

    // Calculate difference, accounting for wrap around PI (-180 to 180)
    let mut diff = end_rad - start_rad;
    while diff <= -PI {
        diff += 2.0 * PI;
    }
    while diff > PI {
        diff -= 2.0 * PI;
    }

    let interpolated_rad = start_rad + diff * alpha;
    interpolated_rad.to_degrees().rem_euclid(360.0) // Convert back and wrap 0-360
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_lerp_f64() {
        assert_approx_eq!(lerp_f64(0.0, 10.0, 0.5), 5.0);
        assert_approx_eq!(lerp_f64(0.0, 10.0, 0.0), 0.0);
        assert_approx_eq!(lerp_f64(0.0, 10.0, 1.0), 10.0);
        assert_approx_eq!(lerp_f64(5.0, 10.0, 0.5), 7.5);
    }

    #[test]
    fn test_lerp_pose() {
        let start = Pose::with_heading(0.0, 0.0, 0.0);
        let end = Pose::with_heading(10.0, 20.0, 90.0);
        let result = lerp_pose(start, end, 0.5);
        assert_approx_eq!(result.x, 5.0);
        assert_approx_eq!(result.y, 10.0);
        assert_approx_eq!(result.heading, 45.0);
    }

    #[test]
    fn test_angle_lerp() {
        // Simple case
        assert_approx_eq!(angle_lerp(0.0, 90.0, 0.5), 45.0);

        // Wrapping cases - use higher epsilon due to floating point issues
        let result = angle_lerp(350.0, 10.0, 0.5);
        assert!(
            (result - 0.0).abs() < 0.01,
            "Expected approximately 0.0, got {}",
            result
        );

        // Moving clockwise vs counterclockwise should take shortest path
        let result2 = angle_lerp(0.0, 270.0, 0.5);
        assert!(
            (result2 - 315.0).abs() < 0.01,
            "Expected approximately 315.0, got {}",
            result2
        );
    }
}
