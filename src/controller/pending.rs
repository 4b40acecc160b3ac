//! The per-tick accumulator of pending camera motion.

use bevy_math::DVec3;
use bevy_reflect::prelude::*;

/// Motion accumulated from input events since the last integration tick.
///
/// Input handlers only ever add to this accumulator, so events arriving in
/// any order between two ticks produce the same integrated result. The
/// integrator consumes it once per tick via [`PendingMotion::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PendingMotion {
    /// Pending azimuthal rotation, in radians.
    pub theta: f64,
    /// Pending polar rotation, in radians.
    pub phi: f64,
    /// Pending world-space translation of the target.
    pub pan: DVec3,
    /// Pending multiplicative factor on the orbit radius.
    pub scale: f64,
}

impl Default for PendingMotion {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            pan: DVec3::ZERO,
            scale: 1.0,
        }
    }
}

impl PendingMotion {
    /// Queue a horizontal orbit. A positive angle rotates the view left,
    /// toward negative `theta`, so a screen-drag to the right orbits left.
    pub fn rotate_left(&mut self, angle: f64) {
        self.theta -= angle;
    }

    /// Queue a vertical orbit. A positive angle rotates the view up, toward
    /// negative `phi`.
    pub fn rotate_up(&mut self, angle: f64) {
        self.phi -= angle;
    }

    /// Queue a world-space translation of the target.
    pub fn add_pan(&mut self, offset: DVec3) {
        self.pan += offset;
    }

    /// Consume the accumulator at the end of an integration tick.
    ///
    /// With damping, the rotation and pan decay by `1 − factor`, so a single
    /// input coasts smoothly toward zero across subsequent ticks. Without
    /// damping they are consumed entirely. The radial scale resets to 1
    /// either way.
    pub fn settle(&mut self, damping: Option<f64>) {
        match damping {
            Some(factor) => {
                let keep = 1.0 - factor;
                self.theta *= keep;
                self.phi *= keep;
                self.pan *= keep;
            }
            None => {
                self.theta = 0.0;
                self.phi = 0.0;
                self.pan = DVec3::ZERO;
            }
        }
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn settle_without_damping_consumes_everything() {
        let mut pending = PendingMotion::default();
        pending.rotate_left(0.5);
        pending.rotate_up(-0.25);
        pending.add_pan(DVec3::new(1.0, 2.0, 3.0));
        pending.scale *= 2.0;

        pending.settle(None);
        assert_eq!(pending, PendingMotion::default());
    }

    #[test]
    fn settle_with_damping_decays_exponentially() {
        let delta = 1.0;
        let factor = 0.25;
        let mut pending = PendingMotion::default();
        pending.rotate_left(delta);

        for tick in 1..=8 {
            pending.settle(Some(factor));
            let expected = -delta * (1.0 - factor).powi(tick);
            assert_relative_eq!(pending.theta, expected, epsilon = 1e-12);
            assert!(pending.theta != 0.0, "decay must converge, never jump");
        }
    }

    #[test]
    fn scale_resets_even_with_damping() {
        let mut pending = PendingMotion::default();
        pending.scale = 4.0;
        pending.settle(Some(0.25));
        assert_eq!(pending.scale, 1.0);
    }
}
