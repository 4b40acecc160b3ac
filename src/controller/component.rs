//! The primary [`Component`] of the controller, [`OrbitCam`].

use std::f64::consts::TAU;

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::{DQuat, DVec3, Vec2, Vec3};
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    limits::OrbitLimits, motion::ActiveGesture, pending::PendingMotion, spherical::Spherical,
    OrbitCamEvent,
};

/// Threshold on the squared position delta and on the small-angle rotation
/// metric below which an update is not reported as a change.
const CHANGE_EPSILON: f64 = 1e-6;

/// Tracks all state of a camera's orbit controller: its configuration, the
/// accumulated input deltas, and the gesture currently in progress.
///
/// The camera orbits [`OrbitCam::target`], dollies toward and away from it,
/// and pans it across the view plane. The controller owns the target and is
/// the sole writer of the camera's translation and rotation once attached;
/// the `Transform` and `Projection` components stay on the camera entity and
/// are written back once per tick by [`OrbitCam::update_camera_positions`].
///
/// # Moving the camera
///
/// [`DefaultInputPlugin`](crate::input::DefaultInputPlugin) feeds mouse,
/// touch, and keyboard input to every enabled controller. To drive the
/// controller yourself instead:
///
/// 1. Start a gesture with [`OrbitCam::begin_rotate`], [`OrbitCam::begin_dolly`],
///    [`OrbitCam::begin_pan`], or [`OrbitCam::begin_touch`].
/// 2. While it is active, send pixel-space samples with
///    [`OrbitCam::rotate_pixels`], [`OrbitCam::dolly_pixels`], and
///    [`OrbitCam::pan_pixels`].
/// 3. End it with [`OrbitCam::end_gesture`].
///
/// Deltas accumulate between ticks and are integrated by [`OrbitCam::update`];
/// accumulation is order independent, so interleaved input sources need no
/// coordination.
#[derive(Debug, Clone, Reflect, Component)]
#[reflect(Component, Default)]
pub struct OrbitCam {
    /// Master switch. When false, the input systems and
    /// [`OrbitCam::update_camera_positions`] skip this camera entirely.
    pub enabled: bool,
    /// The focus point the camera orbits. Pan gestures move it; orbiting then
    /// continues around the panned point.
    pub target: DVec3,
    /// The orbit axis. The camera's up direction stays aligned with this
    /// vector, and the polar angle is measured from it.
    pub up: Vec3,
    /// Bounds on the orbit radius, zoom, and orbit angles.
    pub limits: OrbitLimits,
    /// Per-gesture kill switches.
    pub enabled_motion: EnabledMotion,
    /// Input sensitivity of the camera.
    pub sensitivity: Sensitivity,
    /// Inertia smoothing of pending motion across ticks.
    pub damping: Damping,
    /// Idle spin around the target.
    pub auto_rotate: AutoRotate,
    gesture: ActiveGesture,
    pending: PendingMotion,
    spherical: Spherical,
    rest: Option<RestPose>,
    last_position: DVec3,
    last_rotation: DQuat,
    zoom_changed: bool,
}

impl Default for OrbitCam {
    fn default() -> Self {
        Self {
            enabled: true,
            target: DVec3::ZERO,
            up: Vec3::Y,
            limits: Default::default(),
            enabled_motion: Default::default(),
            sensitivity: Default::default(),
            damping: Default::default(),
            auto_rotate: Default::default(),
            gesture: Default::default(),
            pending: Default::default(),
            spherical: Default::default(),
            rest: None,
            last_position: DVec3::ZERO,
            last_rotation: DQuat::IDENTITY,
            zoom_changed: false,
        }
    }
}

impl OrbitCam {
    /// Create a controller orbiting the given focus point.
    pub fn new(target: DVec3) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// The gesture currently in progress.
    pub fn gesture(&self) -> ActiveGesture {
        self.gesture
    }

    /// The polar angle of the orbit as of the last tick, in radians.
    pub fn polar_angle(&self) -> f64 {
        self.spherical.phi
    }

    /// The azimuthal angle of the orbit as of the last tick, in radians.
    pub fn azimuthal_angle(&self) -> f64 {
        self.spherical.theta
    }

    /// Start a mouse orbit gesture. Returns whether the gesture started; it
    /// will not when rotation is disabled or another gesture is active.
    pub fn begin_rotate(&mut self) -> bool {
        if !self.enabled_motion.rotate || !self.gesture.is_idle() {
            return false;
        }
        self.gesture = ActiveGesture::Rotating;
        true
    }

    /// Start a mouse drag-dolly gesture. Returns whether the gesture started.
    pub fn begin_dolly(&mut self) -> bool {
        if !self.enabled_motion.zoom || !self.gesture.is_idle() {
            return false;
        }
        self.gesture = ActiveGesture::Dollying;
        true
    }

    /// Start a mouse pan gesture. Returns whether the gesture started.
    pub fn begin_pan(&mut self) -> bool {
        if !self.enabled_motion.pan || !self.gesture.is_idle() {
            return false;
        }
        self.gesture = ActiveGesture::Panning;
        true
    }

    /// Start or reconfigure a touch gesture for the given contact count: one
    /// finger orbits, two dolly, three pan. Any other count returns the
    /// controller to idle. Returns whether a new gesture started.
    pub fn begin_touch(&mut self, fingers: usize) -> bool {
        if self.gesture.is_pointer() {
            return false;
        }
        let next = match fingers {
            1 if self.enabled_motion.rotate => ActiveGesture::TouchRotating,
            2 if self.enabled_motion.zoom => ActiveGesture::TouchDollying,
            3 if self.enabled_motion.pan => ActiveGesture::TouchPanning,
            1..=3 => return false,
            _ => {
                self.gesture = ActiveGesture::Idle;
                return false;
            }
        };
        let started = self.gesture != next;
        self.gesture = next;
        started
    }

    /// End the active gesture, returning the controller to idle. Deltas the
    /// gesture already accumulated remain pending; there is no cancel-vs-
    /// commit distinction. Returns whether a gesture was actually active.
    pub fn end_gesture(&mut self) -> bool {
        if self.gesture.is_idle() {
            return false;
        }
        self.gesture = ActiveGesture::Idle;
        true
    }

    /// Queue a horizontal orbit. A positive angle rotates the view left.
    pub fn rotate_left(&mut self, angle: f64) {
        self.pending.rotate_left(angle);
    }

    /// Queue a vertical orbit. A positive angle rotates the view up.
    pub fn rotate_up(&mut self, angle: f64) {
        self.pending.rotate_up(angle);
    }

    /// Queue a pan along the camera's local X axis. The distance is negated
    /// so that dragging right moves the apparent world left.
    pub fn pan_left(&mut self, distance: f64, camera_transform: &Transform) {
        let x_axis = (camera_transform.rotation * Vec3::X).as_dvec3();
        self.pending.add_pan(x_axis * -distance);
    }

    /// Queue a pan along the camera's local Y axis.
    pub fn pan_up(&mut self, distance: f64, camera_transform: &Transform) {
        let y_axis = (camera_transform.rotation * Vec3::Y).as_dvec3();
        self.pending.add_pan(y_axis * distance);
    }

    /// Convert a pixel-space drag into orbit rotation and queue it. Dragging
    /// across the full viewport is one revolution, scaled by the rotate
    /// sensitivity.
    pub fn rotate_pixels(&mut self, delta: Vec2, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            warn_once!("OrbitCam: degenerate viewport, ignoring rotate input");
            return;
        }
        let speed = self.sensitivity.rotate;
        self.pending
            .rotate_left(TAU * delta.x as f64 / viewport.x as f64 * speed);
        self.pending
            .rotate_up(TAU * delta.y as f64 / viewport.y as f64 * speed);
    }

    /// Convert a pixel-space drag into a pan and queue it.
    ///
    /// Perspective pan speed scales with the distance to the target, so the
    /// world appears pinned to the cursor at the target's depth. Orthographic
    /// pan speed comes from the projected frustum size, which already
    /// accounts for zoom. Any other projection kind disables panning and logs
    /// a diagnostic; the controller keeps running for rotation.
    pub fn pan_pixels(
        &mut self,
        delta: Vec2,
        viewport: Vec2,
        camera_transform: &Transform,
        projection: &Projection,
    ) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            warn_once!("OrbitCam: degenerate viewport, ignoring pan input");
            return;
        }
        match projection {
            Projection::Perspective(perspective) => {
                // Half of the vertical fov spans from the view center to the
                // top of the screen, hence the factor of two below.
                let target_distance = (camera_transform.translation.as_dvec3() - self.target)
                    .length()
                    * (perspective.fov as f64 / 2.0).tan();
                self.pan_left(
                    2.0 * delta.x as f64 * target_distance / viewport.y as f64,
                    camera_transform,
                );
                self.pan_up(
                    2.0 * delta.y as f64 * target_distance / viewport.y as f64,
                    camera_transform,
                );
            }
            Projection::Orthographic(ortho) => {
                self.pan_left(
                    delta.x as f64 * ortho.area.width() as f64 / viewport.x as f64,
                    camera_transform,
                );
                self.pan_up(
                    delta.y as f64 * ortho.area.height() as f64 / viewport.y as f64,
                    camera_transform,
                );
            }
            _ => {
                warn_once!("OrbitCam: unsupported camera projection, pan disabled");
                self.enabled_motion.pan = false;
            }
        }
    }

    /// Convert a vertical drag into a dolly step: dragging down dollies in,
    /// dragging up dollies out, each by the per-step zoom scale.
    pub fn dolly_pixels(&mut self, delta_y: f32, projection: &mut Projection) {
        let step = self.zoom_scale();
        if delta_y > 0.0 {
            self.dolly_in(step, projection);
        } else if delta_y < 0.0 {
            self.dolly_out(step, projection);
        }
    }

    /// Dolly by dividing the pending radius factor by `dolly_scale`, or for
    /// orthographic projections by multiplying the zoom by it (clamped, an
    /// immediate side effect rather than a deferred delta). Any other
    /// projection kind disables dollying and logs a diagnostic.
    pub fn dolly_in(&mut self, dolly_scale: f64, projection: &mut Projection) {
        match projection {
            Projection::Perspective(_) => self.pending.scale /= dolly_scale,
            Projection::Orthographic(ortho) => {
                let zoom = self.limits.clamp_zoom(ortho_zoom(ortho) * dolly_scale);
                set_ortho_zoom(ortho, zoom);
                self.zoom_changed = true;
            }
            _ => {
                warn_once!("OrbitCam: unsupported camera projection, dolly/zoom disabled");
                self.enabled_motion.zoom = false;
            }
        }
    }

    /// The inverse of [`OrbitCam::dolly_in`]: multiplies the pending radius
    /// factor by `dolly_scale`, or divides the orthographic zoom by it.
    pub fn dolly_out(&mut self, dolly_scale: f64, projection: &mut Projection) {
        match projection {
            Projection::Perspective(_) => self.pending.scale *= dolly_scale,
            Projection::Orthographic(ortho) => {
                let zoom = self.limits.clamp_zoom(ortho_zoom(ortho) / dolly_scale);
                set_ortho_zoom(ortho, zoom);
                self.zoom_changed = true;
            }
            _ => {
                warn_once!("OrbitCam: unsupported camera projection, dolly/zoom disabled");
                self.enabled_motion.zoom = false;
            }
        }
    }

    /// A one-shot dolly from a wheel tick. Only the scroll direction is used;
    /// a positive amount (scrolling up) moves the camera toward the target.
    /// Accepted while idle or rotating when zoom is enabled; returns whether
    /// the event was accepted.
    ///
    /// Wheel gestures are instantaneous: they emit only a `change`
    /// notification from the next integration tick, never `start`/`end`.
    pub fn wheel_dolly(&mut self, amount: f32, projection: &mut Projection) -> bool {
        if !self.enabled_motion.zoom || !self.gesture.accepts_wheel() {
            return false;
        }
        let step = self.zoom_scale();
        if amount > 0.0 {
            self.dolly_out(step, projection);
        } else if amount < 0.0 {
            self.dolly_in(step, projection);
        } else {
            return false;
        }
        true
    }

    /// A one-shot pan from an arrow key press. `direction` is the unit
    /// pixel-space direction; the distance is the key-pan sensitivity in
    /// pixels. Requires both keys and pan to be enabled.
    pub fn key_pan(
        &mut self,
        direction: Vec2,
        viewport: Vec2,
        camera_transform: &Transform,
        projection: &Projection,
    ) {
        if !self.enabled_motion.keys || !self.enabled_motion.pan {
            return;
        }
        let pixels = direction * self.sensitivity.key_pan as f32;
        self.pan_pixels(pixels, viewport, camera_transform, projection);
    }

    /// Run one integration tick: reconstruct the spherical state from the
    /// camera position, apply pending deltas and the configured limits, write
    /// the new pose back, and decay the accumulator.
    ///
    /// Returns whether a visible change occurred, comparing against the last
    /// reported pose so listeners are not flooded with no-op updates.
    pub fn update(&mut self, camera_transform: &mut Transform, projection: &Projection) -> bool {
        if self.rest.is_none() {
            self.rest = Some(RestPose {
                target: self.target,
                position: camera_transform.translation,
                zoom: projection_zoom(projection),
            });
        }

        // The configured up axis is the orbit axis: rotate the offset into
        // the up-is-+Y frame, orbit there, and rotate back. Recomputed every
        // tick since the up vector may change between ticks.
        let up = self.up.as_dvec3().try_normalize().unwrap_or(DVec3::Y);
        let frame = DQuat::from_rotation_arc(up, DVec3::Y);

        let offset = frame * (camera_transform.translation.as_dvec3() - self.target);
        self.spherical.set_from_cartesian(offset);

        if self.auto_rotate.enabled && self.gesture.is_idle() {
            self.pending.rotate_left(self.auto_rotate.angle_per_tick());
        }

        self.spherical.theta = self
            .limits
            .clamp_azimuth(self.spherical.theta + self.pending.theta);
        self.spherical.phi = self
            .limits
            .clamp_polar(self.spherical.phi + self.pending.phi);
        self.spherical.make_safe();
        self.spherical.radius = self
            .limits
            .clamp_radius(self.spherical.radius * self.pending.scale);

        // Pan moves the focus point, so subsequent orbiting continues around
        // the panned location.
        self.target += self.pending.pan;

        let offset = frame.inverse() * self.spherical.to_cartesian();
        camera_transform.translation = (self.target + offset).as_vec3();
        camera_transform.look_at(self.target.as_vec3(), self.up);

        self.pending
            .settle(self.damping.enabled.then_some(self.damping.factor));

        // Change metric: squared displacement, plus the rotation angle via
        // the small-angle approximation 8 * (1 - cos(x/2)) ~= x^2.
        let position = camera_transform.translation.as_dvec3();
        let rotation = camera_transform.rotation.as_dquat();
        let changed = self.zoom_changed
            || self.last_position.distance_squared(position) > CHANGE_EPSILON
            || 8.0 * (1.0 - self.last_rotation.dot(rotation)) > CHANGE_EPSILON;
        if changed {
            self.last_position = position;
            self.last_rotation = rotation;
            self.zoom_changed = false;
        }
        changed
    }

    /// Restore the target, camera position, and orthographic zoom captured on
    /// the controller's first tick, clear any gesture and pending motion, and
    /// re-integrate. Returns false if the controller has never ticked.
    pub fn reset(&mut self, camera_transform: &mut Transform, projection: &mut Projection) -> bool {
        let Some(rest) = self.rest else {
            return false;
        };
        self.target = rest.target;
        camera_transform.translation = rest.position;
        if let Projection::Orthographic(ortho) = projection {
            set_ortho_zoom(ortho, rest.zoom);
        }
        self.pending = PendingMotion::default();
        self.gesture = ActiveGesture::Idle;
        // Force the change notification even if the camera never moved.
        self.zoom_changed = true;
        self.update(camera_transform, projection)
    }

    /// Integrate pending motion for every enabled controller, once per frame.
    /// Emits [`OrbitCamEvent::PoseChanged`] and requests a redraw for each
    /// camera whose pose visibly changed.
    pub fn update_camera_positions(
        mut cameras: Query<(Entity, &mut OrbitCam, &mut Transform, &Projection)>,
        mut notify: EventWriter<OrbitCamEvent>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for (entity, mut controller, mut transform, projection) in &mut cameras {
            if !controller.enabled {
                continue;
            }
            if controller.update(&mut transform, projection) {
                notify.write(OrbitCamEvent::PoseChanged(entity));
                redraw.write(RequestRedraw);
            }
        }
    }

    /// The multiplicative dolly step applied per wheel tick or drag step.
    fn zoom_scale(&self) -> f64 {
        0.95f64.powf(self.sensitivity.zoom)
    }
}

/// Per-gesture kill switches. Disabling a capability suppresses new gestures
/// but does not cancel one already in progress.
#[derive(Debug, Clone, Reflect)]
pub struct EnabledMotion {
    /// Should orbit rotation be enabled?
    pub rotate: bool,
    /// Should dolly/zoom be enabled?
    pub zoom: bool,
    /// Should pan be enabled?
    pub pan: bool,
    /// Should arrow-key panning be enabled?
    pub keys: bool,
}

impl Default for EnabledMotion {
    fn default() -> Self {
        Self {
            rotate: true,
            zoom: true,
            pan: true,
            keys: true,
        }
    }
}

/// The sensitivity of the camera controller to inputs.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct Sensitivity {
    /// Multiplier on orbit rotation per pixel dragged.
    pub rotate: f64,
    /// Exponent on the per-step dolly scale.
    pub zoom: f64,
    /// Pixels panned per arrow key press.
    pub key_pan: f64,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            rotate: 1.0,
            zoom: 1.0,
            key_pan: 7.0,
        }
    }
}

/// Exponential decay of pending motion across ticks instead of instant
/// consumption, producing a coasting feel.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct Damping {
    /// Smooth pending motion across ticks?
    pub enabled: bool,
    /// Fraction of the pending motion consumed per tick, in `(0, 1]`.
    pub factor: f64,
}

impl Default for Damping {
    fn default() -> Self {
        Self {
            enabled: false,
            factor: 0.25,
        }
    }
}

/// Spin slowly around the target while no gesture is active.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct AutoRotate {
    /// Rotate the camera when idle?
    pub enabled: bool,
    /// Revolutions per 30 seconds at a nominal 60 ticks per second.
    pub speed: f64,
}

impl Default for AutoRotate {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 2.0,
        }
    }
}

impl AutoRotate {
    fn angle_per_tick(&self) -> f64 {
        TAU / 3600.0 * self.speed
    }
}

/// The pose captured on the first tick, restored by [`OrbitCam::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct RestPose {
    target: DVec3,
    position: Vec3,
    zoom: f64,
}

/// Orthographic zoom as exposed on the configuration surface: the reciprocal
/// of the projection scale, so larger zoom magnifies.
fn ortho_zoom(ortho: &OrthographicProjection) -> f64 {
    1.0 / ortho.scale as f64
}

fn set_ortho_zoom(ortho: &mut OrthographicProjection, zoom: f64) {
    ortho.scale = (1.0 / zoom) as f32;
}

fn projection_zoom(projection: &Projection) -> f64 {
    match projection {
        Projection::Orthographic(ortho) => ortho_zoom(ortho),
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn perspective() -> Projection {
        Projection::Perspective(PerspectiveProjection::default())
    }

    fn camera_at_z5() -> (OrbitCam, Transform, Projection) {
        (
            OrbitCam::default(),
            Transform::from_xyz(0.0, 0.0, 5.0),
            perspective(),
        )
    }

    #[test]
    fn quarter_turn_left_orbits_to_negative_x() {
        let (mut cam, mut transform, projection) = camera_at_z5();
        cam.rotate_left(FRAC_PI_2);
        assert!(cam.update(&mut transform, &projection));

        assert_relative_eq!(transform.translation.x, -5.0, epsilon = 1e-4);
        assert_relative_eq!(transform.translation.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(transform.translation.z, 0.0, epsilon = 1e-4);
        assert_relative_eq!(cam.azimuthal_angle(), -FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(cam.polar_angle(), FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(
            transform.translation.distance(Vec3::ZERO),
            5.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn full_viewport_drag_is_one_revolution() {
        let (mut cam, mut transform, projection) = camera_at_z5();
        // Half the viewport width orbits half a revolution.
        cam.rotate_pixels(Vec2::new(400.0, 0.0), Vec2::new(800.0, 600.0));
        cam.update(&mut transform, &projection);
        assert_relative_eq!(transform.translation.z, -5.0, epsilon = 1e-3);
    }

    #[test]
    fn update_without_input_reports_no_change() {
        let (mut cam, mut transform, projection) = camera_at_z5();
        // First tick establishes the reported pose.
        cam.update(&mut transform, &projection);
        assert!(!cam.update(&mut transform, &projection));
        assert!(!cam.update(&mut transform, &projection));
    }

    #[test]
    fn dolly_out_saturates_at_max_distance() {
        let (mut cam, mut transform, mut projection) = camera_at_z5();
        cam.limits.min_distance = 2.0;
        cam.limits.max_distance = 10.0;

        for _ in 0..5 {
            cam.dolly_out(2.0, &mut projection);
            cam.update(&mut transform, &projection);
        }
        assert_relative_eq!(transform.translation.length(), 10.0, epsilon = 1e-4);

        cam.dolly_out(2.0, &mut projection);
        cam.update(&mut transform, &projection);
        assert_relative_eq!(transform.translation.length(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn dolly_in_saturates_at_min_distance() {
        let (mut cam, mut transform, mut projection) = camera_at_z5();
        cam.limits.min_distance = 2.0;
        cam.limits.max_distance = 10.0;

        for _ in 0..8 {
            cam.dolly_in(2.0, &mut projection);
            cam.update(&mut transform, &projection);
        }
        assert_relative_eq!(transform.translation.length(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn wheel_on_orthographic_camera_changes_zoom_only() {
        let mut cam = OrbitCam::default();
        cam.limits.min_zoom = 0.5;
        cam.limits.max_zoom = 2.0;
        let mut transform = Transform::from_xyz(0.0, 0.0, 5.0);
        let mut projection = Projection::Orthographic(OrthographicProjection::default_3d());

        assert!(cam.wheel_dolly(1.0, &mut projection));
        let Projection::Orthographic(ortho) = &projection else {
            unreachable!()
        };
        assert_relative_eq!(1.0 / ortho.scale as f64, 1.0 / 0.95, epsilon = 1e-6);

        // Radius and target are unaffected; the change is still reported.
        assert!(cam.update(&mut transform, &projection));
        assert_eq!(cam.target, DVec3::ZERO);
        assert_relative_eq!(transform.translation.length(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn ortho_zoom_clamps_at_max() {
        let mut cam = OrbitCam::default();
        cam.limits.min_zoom = 0.5;
        cam.limits.max_zoom = 2.0;
        let mut projection = Projection::Orthographic(OrthographicProjection::default_3d());

        for _ in 0..32 {
            assert!(cam.wheel_dolly(1.0, &mut projection));
        }
        let Projection::Orthographic(ortho) = &projection else {
            unreachable!()
        };
        assert_relative_eq!(1.0 / ortho.scale as f64, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn pan_moves_target_and_camera_in_lockstep() {
        let (mut cam, mut transform, projection) = camera_at_z5();
        cam.pan_up(3.0, &transform);
        cam.update(&mut transform, &projection);

        assert_relative_eq!(cam.target.y, 3.0, epsilon = 1e-9);
        assert_relative_eq!(transform.translation.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(transform.translation.y, 3.0, epsilon = 1e-4);
        assert_relative_eq!(transform.translation.z, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn pending_motion_is_consumed_in_one_undamped_tick() {
        let (mut cam, mut transform, mut projection) = camera_at_z5();
        cam.rotate_left(0.3);
        cam.rotate_up(0.1);
        cam.pan_left(1.0, &transform);
        cam.dolly_out(1.5, &mut projection);

        cam.update(&mut transform, &projection);
        assert_eq!(cam.pending, PendingMotion::default());
    }

    #[test]
    fn damped_rotation_decays_geometrically() {
        let (mut cam, mut transform, projection) = camera_at_z5();
        cam.damping = Damping {
            enabled: true,
            factor: 0.25,
        };
        let delta = 0.5;
        cam.rotate_left(delta);

        for tick in 1..=6 {
            cam.update(&mut transform, &projection);
            let expected = -delta * 0.75f64.powi(tick);
            assert_relative_eq!(cam.pending.theta, expected, epsilon = 1e-12);
        }
        assert_eq!(cam.pending.scale, 1.0);
    }

    #[test]
    fn polar_and_radius_limits_hold_for_any_input() {
        let (mut cam, mut transform, mut projection) = camera_at_z5();
        cam.limits.min_polar_angle = 0.5;
        cam.limits.max_polar_angle = 2.0;
        cam.limits.min_distance = 2.0;
        cam.limits.max_distance = 10.0;

        for tick in 0..24 {
            let sign = if tick % 2 == 0 { 1.0 } else { -1.0 };
            cam.rotate_up(sign * 10.0);
            cam.rotate_left(sign * 3.0);
            if tick % 3 == 0 {
                cam.dolly_out(4.0, &mut projection);
            } else {
                cam.dolly_in(4.0, &mut projection);
            }
            cam.update(&mut transform, &projection);

            assert!(cam.polar_angle() >= 0.5 && cam.polar_angle() <= 2.0);
            let radius = (transform.translation.as_dvec3() - cam.target).length();
            assert!(radius >= 2.0 - 1e-4 && radius <= 10.0 + 1e-4);
        }
    }

    #[test]
    fn disabled_capabilities_suppress_new_gestures() {
        let mut cam = OrbitCam::default();
        cam.enabled_motion.rotate = false;
        assert!(!cam.begin_rotate());
        assert!(cam.gesture().is_idle());

        cam.enabled_motion.pan = false;
        assert!(!cam.begin_pan());
        assert!(!cam.begin_touch(3));
    }

    #[test]
    fn disabling_mid_gesture_does_not_cancel_it() {
        let mut cam = OrbitCam::default();
        assert!(cam.begin_rotate());
        cam.enabled_motion.rotate = false;
        assert_eq!(cam.gesture(), ActiveGesture::Rotating);

        cam.rotate_pixels(Vec2::new(100.0, 0.0), Vec2::new(800.0, 600.0));
        assert!(cam.pending.theta != 0.0);
    }

    #[test]
    fn only_one_gesture_at_a_time() {
        let mut cam = OrbitCam::default();
        assert!(cam.begin_rotate());
        assert!(!cam.begin_pan());
        assert!(!cam.begin_dolly());
        assert_eq!(cam.gesture(), ActiveGesture::Rotating);

        assert!(cam.end_gesture());
        assert!(!cam.end_gesture());
        assert!(cam.begin_pan());
    }

    #[test]
    fn touch_contact_counts_select_the_gesture() {
        let mut cam = OrbitCam::default();
        assert!(cam.begin_touch(1));
        assert_eq!(cam.gesture(), ActiveGesture::TouchRotating);
        assert!(cam.begin_touch(2));
        assert_eq!(cam.gesture(), ActiveGesture::TouchDollying);
        assert!(cam.begin_touch(3));
        assert_eq!(cam.gesture(), ActiveGesture::TouchPanning);

        // Any other contact count drops back to idle.
        assert!(!cam.begin_touch(4));
        assert!(cam.gesture().is_idle());
    }

    #[test]
    fn wheel_is_rejected_while_panning() {
        let mut cam = OrbitCam::default();
        let mut projection = perspective();
        assert!(cam.begin_pan());
        assert!(!cam.wheel_dolly(1.0, &mut projection));

        cam.end_gesture();
        assert!(cam.begin_rotate());
        assert!(cam.wheel_dolly(1.0, &mut projection));
    }

    #[test]
    fn degenerate_viewport_samples_are_ignored() {
        let mut cam = OrbitCam::default();
        let transform = Transform::from_xyz(0.0, 0.0, 5.0);
        let projection = perspective();

        cam.rotate_pixels(Vec2::splat(50.0), Vec2::ZERO);
        cam.pan_pixels(Vec2::splat(50.0), Vec2::ZERO, &transform, &projection);
        assert_eq!(cam.pending, PendingMotion::default());
    }

    #[test]
    fn auto_rotate_spins_only_while_idle() {
        let (mut cam, mut transform, projection) = camera_at_z5();
        cam.auto_rotate.enabled = true;
        cam.update(&mut transform, &projection);
        let spun = cam.azimuthal_angle();
        assert!(spun < 0.0);

        cam.begin_rotate();
        cam.update(&mut transform, &projection);
        assert_relative_eq!(cam.azimuthal_angle(), spun, epsilon = 1e-9);
    }

    #[test]
    fn reset_restores_the_first_tick_pose() {
        let (mut cam, mut transform, mut projection) = camera_at_z5();
        cam.update(&mut transform, &projection);

        cam.rotate_left(1.0);
        cam.pan_up(2.0, &transform);
        cam.update(&mut transform, &projection);
        assert!(transform.translation.distance(Vec3::new(0.0, 0.0, 5.0)) > 1.0);

        assert!(cam.reset(&mut transform, &mut projection));
        assert_eq!(cam.target, DVec3::ZERO);
        assert_relative_eq!(transform.translation.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(transform.translation.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(transform.translation.z, 5.0, epsilon = 1e-4);
        assert!(cam.gesture().is_idle());
    }

    #[test]
    fn reset_before_first_tick_is_a_no_op() {
        let mut cam = OrbitCam::default();
        let mut transform = Transform::from_xyz(0.0, 0.0, 5.0);
        let mut projection = perspective();
        assert!(!cam.reset(&mut transform, &mut projection));
    }
}
