//! Translates raw mouse, touch, and keyboard input into controller gestures.
//!
//! The systems here are the default gesture classifier: they watch Bevy's
//! input resources and events, start and end gestures on every enabled
//! [`OrbitCam`], and convert move samples into pixel-space deltas for the
//! controller's accumulator. Skip [`DefaultInputPlugin`] and call the
//! [`OrbitCam`] gesture API yourself to use a different input scheme.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{
    mouse::{MouseMotion, MouseWheel},
    prelude::*,
    touch::Touches,
};
use bevy_math::Vec2;
use bevy_reflect::prelude::*;
use bevy_render::prelude::*;
use bevy_transform::prelude::*;

use crate::controller::{component::OrbitCam, motion::ActiveGesture, OrbitCamEvent};

/// Maps physical buttons and keys to the controller's logical roles. The
/// state machine only knows the roles; rebinding is configuration.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource, Default)]
pub struct OrbitCamInputMap {
    /// Mouse button that orbits while held.
    pub rotate_button: MouseButton,
    /// Mouse button that dollies while held.
    pub dolly_button: MouseButton,
    /// Mouse button that pans while held.
    pub pan_button: MouseButton,
    /// Key that pans the view left.
    pub pan_left_key: KeyCode,
    /// Key that pans the view up.
    pub pan_up_key: KeyCode,
    /// Key that pans the view right.
    pub pan_right_key: KeyCode,
    /// Key that pans the view down.
    pub pan_down_key: KeyCode,
}

impl Default for OrbitCamInputMap {
    fn default() -> Self {
        Self {
            rotate_button: MouseButton::Left,
            dolly_button: MouseButton::Middle,
            pan_button: MouseButton::Right,
            pan_left_key: KeyCode::ArrowLeft,
            pan_up_key: KeyCode::ArrowUp,
            pan_right_key: KeyCode::ArrowRight,
            pan_down_key: KeyCode::ArrowDown,
        }
    }
}

/// Adds the default mouse, touch, and keyboard gesture systems. Requires
/// [`MinimalOrbitCamPlugin`](crate::controller::MinimalOrbitCamPlugin).
pub struct DefaultInputPlugin;

impl Plugin for DefaultInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCamInputMap>()
            .register_type::<OrbitCamInputMap>()
            .add_systems(
                PreUpdate,
                (
                    mouse_buttons,
                    mouse_motion,
                    mouse_wheel,
                    touch_gestures,
                    arrow_keys,
                )
                    .chain()
                    .before(OrbitCam::update_camera_positions),
            );
    }
}

/// Start and end mouse gestures from button presses and releases.
fn mouse_buttons(
    map: Res<OrbitCamInputMap>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut cameras: Query<(Entity, &mut OrbitCam)>,
    mut notify: EventWriter<OrbitCamEvent>,
) {
    let released_any = [map.rotate_button, map.dolly_button, map.pan_button]
        .into_iter()
        .any(|button| buttons.just_released(button));

    for (entity, mut controller) in &mut cameras {
        if !controller.enabled {
            continue;
        }
        let started = if buttons.just_pressed(map.rotate_button) {
            controller.begin_rotate()
        } else if buttons.just_pressed(map.dolly_button) {
            controller.begin_dolly()
        } else if buttons.just_pressed(map.pan_button) {
            controller.begin_pan()
        } else {
            false
        };
        if started {
            notify.write(OrbitCamEvent::GestureStarted(entity));
        }

        if released_any && controller.gesture().is_pointer() && controller.end_gesture() {
            notify.write(OrbitCamEvent::GestureEnded(entity));
        }
    }
}

/// Route cursor motion to the active mouse gesture.
fn mouse_motion(
    mut motion: EventReader<MouseMotion>,
    mut cameras: Query<(&Camera, &mut OrbitCam, &Transform, &mut Projection)>,
) {
    let delta: Vec2 = motion.read().map(|event| event.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }
    for (camera, mut controller, transform, mut projection) in &mut cameras {
        if !controller.enabled {
            continue;
        }
        let Some(viewport) = camera.logical_viewport_size() else {
            continue;
        };
        match controller.gesture() {
            ActiveGesture::Rotating => controller.rotate_pixels(delta, viewport),
            ActiveGesture::Dollying => controller.dolly_pixels(delta.y, &mut projection),
            ActiveGesture::Panning => {
                controller.pan_pixels(delta, viewport, transform, &projection)
            }
            _ => {}
        }
    }
}

/// One-shot dollies from scroll wheel ticks. Only the scroll direction is
/// used, so wheels reporting lines and trackpads reporting pixels behave the
/// same per tick.
fn mouse_wheel(
    mut wheel: EventReader<MouseWheel>,
    mut cameras: Query<(&mut OrbitCam, &mut Projection)>,
) {
    for event in wheel.read() {
        for (mut controller, mut projection) in &mut cameras {
            if !controller.enabled {
                continue;
            }
            controller.wheel_dolly(event.y, &mut projection);
        }
    }
}

/// Last-seen touch samples, for deriving per-frame deltas.
#[derive(Debug, Default)]
struct TouchTracker {
    fingers: usize,
    last_position: Vec2,
    last_pinch: f32,
}

/// Classify touch contacts into gestures and route their motion: one finger
/// orbits, a two-finger pinch dollies, three fingers pan.
fn touch_gestures(
    touches: Res<Touches>,
    mut tracker: Local<TouchTracker>,
    mut cameras: Query<(Entity, &Camera, &mut OrbitCam, &Transform, &mut Projection)>,
    mut notify: EventWriter<OrbitCamEvent>,
) {
    let positions: Vec<Vec2> = touches.iter().map(|touch| touch.position()).collect();
    let fingers = positions.len();
    let ended = touches.any_just_released() || touches.any_just_canceled();
    let pinch = if fingers >= 2 {
        positions[0].distance(positions[1])
    } else {
        0.0
    };

    for (entity, camera, mut controller, transform, mut projection) in &mut cameras {
        if !controller.enabled {
            continue;
        }

        if ended {
            // Lifting any finger ends the gesture; a changed contact count on
            // a later frame starts a fresh one.
            if controller.end_gesture() {
                notify.write(OrbitCamEvent::GestureEnded(entity));
            }
        } else if fingers != tracker.fingers {
            if controller.begin_touch(fingers) {
                notify.write(OrbitCamEvent::GestureStarted(entity));
            }
        } else if fingers > 0 {
            let Some(viewport) = camera.logical_viewport_size() else {
                continue;
            };
            let delta = positions[0] - tracker.last_position;
            match controller.gesture() {
                ActiveGesture::TouchRotating if fingers == 1 => {
                    controller.rotate_pixels(delta, viewport)
                }
                // Spreading the fingers apart dollies toward the target.
                ActiveGesture::TouchDollying if fingers == 2 => {
                    controller.dolly_pixels(tracker.last_pinch - pinch, &mut projection)
                }
                ActiveGesture::TouchPanning if fingers == 3 => {
                    controller.pan_pixels(delta, viewport, transform, &projection)
                }
                _ => {}
            }
        }
    }

    tracker.fingers = if ended { 0 } else { fingers };
    if fingers > 0 {
        tracker.last_position = positions[0];
        tracker.last_pinch = pinch;
    }
}

/// One-shot pans from arrow key presses.
fn arrow_keys(
    map: Res<OrbitCamInputMap>,
    keys: Res<ButtonInput<KeyCode>>,
    mut cameras: Query<(&Camera, &mut OrbitCam, &Transform, &Projection)>,
) {
    let mut direction = Vec2::ZERO;
    for key in keys.get_just_pressed() {
        if *key == map.pan_up_key {
            direction.y += 1.0;
        } else if *key == map.pan_down_key {
            direction.y -= 1.0;
        } else if *key == map.pan_left_key {
            direction.x += 1.0;
        } else if *key == map.pan_right_key {
            direction.x -= 1.0;
        }
    }
    if direction == Vec2::ZERO {
        return;
    }
    for (camera, mut controller, transform, projection) in &mut cameras {
        if !controller.enabled {
            continue;
        }
        let Some(viewport) = camera.logical_viewport_size() else {
            continue;
        };
        controller.key_pan(direction, viewport, transform, projection);
    }
}
