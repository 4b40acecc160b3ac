//! Spherical coordinates for the camera-to-target offset.

use bevy_math::DVec3;
use bevy_reflect::prelude::*;

/// How far `phi` is kept away from the poles by [`Spherical::make_safe`].
const POLE_EPSILON: f64 = 1e-6;

/// The camera's offset from its target, expressed in spherical coordinates in
/// the "up is +Y" reference frame.
///
/// `phi` is the polar angle measured down from the +Y axis, in `[0, π]`.
/// `theta` is the azimuthal angle around +Y, measured from +Z toward +X.
/// Reconstructing the cartesian offset from `(radius, phi, theta)` reproduces
/// the offset the angles were derived from, up to floating point tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Spherical {
    /// Distance from the target to the camera.
    pub radius: f64,
    /// Polar angle from the +Y axis, in radians.
    pub phi: f64,
    /// Azimuthal angle around the +Y axis, in radians.
    pub theta: f64,
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: 1.0,
            phi: 0.0,
            theta: 0.0,
        }
    }
}

impl Spherical {
    /// Derive spherical coordinates from a cartesian offset.
    pub fn from_cartesian(offset: DVec3) -> Self {
        let mut spherical = Self::default();
        spherical.set_from_cartesian(offset);
        spherical
    }

    /// Replace this value with the coordinates of the given cartesian offset.
    pub fn set_from_cartesian(&mut self, offset: DVec3) {
        self.radius = offset.length();
        if self.radius == 0.0 {
            self.theta = 0.0;
            self.phi = 0.0;
        } else {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        }
    }

    /// The cartesian offset these coordinates describe.
    pub fn to_cartesian(&self) -> DVec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        DVec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` just inside the poles, where `theta` would otherwise become
    /// undefined and the orbit would gimbal lock.
    pub fn make_safe(&mut self) {
        self.phi = self
            .phi
            .clamp(POLE_EPSILON, std::f64::consts::PI - POLE_EPSILON);
    }
}
