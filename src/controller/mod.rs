//! The core camera controller: a component holding the orbit state, and the
//! system that integrates pending motion into the camera transform each tick.

pub mod component;
pub mod limits;
pub mod motion;
pub mod pending;
pub mod spherical;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

use component::OrbitCam;

/// Controller lifecycle notifications, keyed by camera entity.
///
/// `PoseChanged` fires once per tick in which the integrator actually moved
/// the camera, whether the motion came from a gesture, damped coasting, or
/// auto-rotation. Gesture events fire on the discrete input transitions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub enum OrbitCamEvent {
    /// A gesture began on this camera.
    GestureStarted(Entity),
    /// The camera's transform or zoom changed this tick.
    PoseChanged(Entity),
    /// The active gesture on this camera ended.
    GestureEnded(Entity),
}

/// Adds the controller systems and events, but no input handling. Use this
/// directly to drive [`OrbitCam`]s from your own input systems, or add
/// [`DefaultOrbitCamPlugins`](crate::DefaultOrbitCamPlugins) for the whole
/// stack.
pub struct MinimalOrbitCamPlugin;

impl Plugin for MinimalOrbitCamPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<OrbitCamEvent>()
            .add_systems(PreUpdate, OrbitCam::update_camera_positions)
            .register_type::<OrbitCam>();
    }
}
