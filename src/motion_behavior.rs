use crate::config;
use crate::types::{Pose, WheelVelocity};

/// Integrates a differential-drive pose over one timestep.
///
/// Forward speed is the wheel average, turn rate comes from the wheel
/// difference over the axle width. Headings stay in degrees, wrapped to
/// [0, 360).
pub fn update_pose(dt: f64, velocity: WheelVelocity, pose: &Pose) -> Pose {
    let speed = (velocity.left + velocity.right) / 2.0;
    let angular_rate = (velocity.right - velocity.left) / config::WHEEL_BASE;

    let heading_rad = pose.heading.to_radians();
    Pose {
        x: pose.x + speed * heading_rad.cos() * dt,
        y: pose.y + speed * heading_rad.sin() * dt,
        heading: (pose.heading + angular_rate.to_degrees() * dt).rem_euclid(360.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_straight_line_along_heading() {
        let pose = Pose::with_heading(100.0, 100.0, 0.0);
        let next = update_pose(1.0, WheelVelocity::new(5.0, 5.0), &pose);
        assert_approx_eq!(next.x, 105.0);
        assert_approx_eq!(next.y, 100.0);
        assert_approx_eq!(next.heading, 0.0);
    }

    #[test]
    fn test_straight_line_rotated_heading() {
        let pose = Pose::with_heading(100.0, 100.0, 90.0);
        let next = update_pose(1.0, WheelVelocity::new(4.0, 4.0), &pose);
        assert_approx_eq!(next.x, 100.0, 1e-6);
        assert_approx_eq!(next.y, 104.0);
    }

    #[test]
    fn test_wheel_difference_turns() {
        let pose = Pose::with_heading(0.0, 0.0, 0.0);
        let next = update_pose(1.0, WheelVelocity::new(0.0, 10.0), &pose);
        // (10 - 0) / wheel base of 10 is one radian per unit time.
        assert_approx_eq!(next.heading, 1.0f64.to_degrees());
        assert_approx_eq!(next.x, 5.0);
        assert_approx_eq!(next.y, 0.0);
    }

    #[test]
    fn test_left_heavy_turns_clockwise() {
        let pose = Pose::with_heading(0.0, 0.0, 90.0);
        let next = update_pose(1.0, WheelVelocity::new(10.0, 0.0), &pose);
        assert_approx_eq!(next.heading, 90.0 - 1.0f64.to_degrees());
    }

    #[test]
    fn test_heading_wraps_at_360() {
        let pose = Pose::with_heading(0.0, 0.0, 359.0);
        let next = update_pose(1.0, WheelVelocity::new(0.0, 10.0), &pose);
        assert!(
            next.heading >= 0.0 && next.heading < 360.0,
            "heading must stay in [0, 360), got {}",
            next.heading
        );
        assert_approx_eq!(next.heading, (359.0 + 1.0f64.to_degrees()) - 360.0);
    }

    #[test]
    fn test_dt_scales_displacement() {
        let pose = Pose::with_heading(0.0, 0.0, 0.0);
        let half = update_pose(0.5, WheelVelocity::new(8.0, 8.0), &pose);
        assert_approx_eq!(half.x, 4.0);
    }

    #[test]
    fn test_zero_velocity_holds_pose() {
        let pose = Pose::with_heading(42.0, 24.0, 180.0);
        let next = update_pose(1.0, WheelVelocity::default(), &pose);
        assert_approx_eq!(next.x, 42.0);
        assert_approx_eq!(next.y, 24.0);
        assert_approx_eq!(next.heading, 180.0);
    }
}
