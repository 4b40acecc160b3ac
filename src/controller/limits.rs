//! Configurable bounds on the orbit.

use bevy_reflect::prelude::*;
use std::f64::consts::PI;

/// Bounds applied to the orbit every tick: radius, orthographic zoom, and the
/// polar and azimuthal orbit angles.
///
/// Angle limits must be sub-intervals of the angles' natural ranges: polar in
/// `[0, π]`, azimuth in `[−π, π]` or unbounded. Inverted bounds (a minimum
/// above its maximum) are not validated; the clamp formulas are applied
/// as-is, so keeping bounds ordered is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct OrbitLimits {
    /// How close the camera may dolly toward the target (perspective only).
    pub min_distance: f64,
    /// How far the camera may dolly away from the target (perspective only).
    pub max_distance: f64,
    /// Lower zoom bound (orthographic only).
    pub min_zoom: f64,
    /// Upper zoom bound (orthographic only).
    pub max_zoom: f64,
    /// How far the camera may orbit above the horizon, in radians.
    pub min_polar_angle: f64,
    /// How far the camera may orbit below the horizon, in radians.
    pub max_polar_angle: f64,
    /// Lower horizontal orbit bound, in radians. Infinite by default.
    pub min_azimuth_angle: f64,
    /// Upper horizontal orbit bound, in radians. Infinite by default.
    pub max_azimuth_angle: f64,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: f64::INFINITY,
            min_zoom: 0.0,
            max_zoom: f64::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_azimuth_angle: f64::NEG_INFINITY,
            max_azimuth_angle: f64::INFINITY,
        }
    }
}

impl OrbitLimits {
    /// Clamp the orbit radius into `[min_distance, max_distance]`.
    pub fn clamp_radius(&self, radius: f64) -> f64 {
        radius.max(self.min_distance).min(self.max_distance)
    }

    /// Clamp an orthographic zoom into `[min_zoom, max_zoom]`.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    /// Clamp the polar angle into `[min_polar_angle, max_polar_angle]`.
    pub fn clamp_polar(&self, phi: f64) -> f64 {
        phi.max(self.min_polar_angle).min(self.max_polar_angle)
    }

    /// Clamp the azimuthal angle into `[min_azimuth_angle,
    /// max_azimuth_angle]`. A no-op with the default infinite bounds.
    pub fn clamp_azimuth(&self, theta: f64) -> f64 {
        theta.max(self.min_azimuth_angle).min(self.max_azimuth_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_is_idempotent() {
        let limits = OrbitLimits {
            min_distance: 2.0,
            max_distance: 10.0,
            min_zoom: 0.5,
            max_zoom: 2.0,
            min_polar_angle: 0.25,
            max_polar_angle: 3.0,
            min_azimuth_angle: -1.0,
            max_azimuth_angle: 1.0,
        };
        for value in [-100.0, -1.0, 0.0, 0.3, 1.5, 5.0, 50.0] {
            assert_eq!(
                limits.clamp_radius(limits.clamp_radius(value)),
                limits.clamp_radius(value)
            );
            assert_eq!(
                limits.clamp_zoom(limits.clamp_zoom(value)),
                limits.clamp_zoom(value)
            );
            assert_eq!(
                limits.clamp_polar(limits.clamp_polar(value)),
                limits.clamp_polar(value)
            );
            assert_eq!(
                limits.clamp_azimuth(limits.clamp_azimuth(value)),
                limits.clamp_azimuth(value)
            );
        }
    }

    #[test]
    fn default_azimuth_is_unbounded() {
        let limits = OrbitLimits::default();
        assert_eq!(limits.clamp_azimuth(123.456), 123.456);
        assert_eq!(limits.clamp_azimuth(-123.456), -123.456);
    }

    #[test]
    fn values_inside_bounds_pass_through() {
        let limits = OrbitLimits {
            min_distance: 2.0,
            max_distance: 10.0,
            ..Default::default()
        };
        assert_eq!(limits.clamp_radius(5.0), 5.0);
        assert_eq!(limits.clamp_radius(1.0), 2.0);
        assert_eq!(limits.clamp_radius(11.0), 10.0);
    }
}
