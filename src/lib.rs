//! A damped orbit camera controller for Bevy.
//!
//! Attach an [`OrbitCam`](controller::component::OrbitCam) to any camera
//! entity to orbit, dolly, and pan it around a target point with the mouse,
//! touch gestures, or the arrow keys. The controller keeps the camera on a
//! sphere around its target, enforces configurable distance, zoom, and angle
//! limits, and can optionally damp motion so gestures coast to a stop.
//!
//! Add [`DefaultOrbitCamPlugins`] for the controller plus the default input
//! bindings, or [`MinimalOrbitCamPlugin`](controller::MinimalOrbitCamPlugin)
//! alone to supply your own input systems.
//!
//! ```
//! # use bevy_app::prelude::*;
//! # use bevy_orbit_cam::prelude::*;
//! App::new().add_plugins(DefaultOrbitCamPlugins);
//! ```

#![warn(missing_docs)]

pub mod controller;
pub mod input;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::{AutoRotate, Damping, EnabledMotion, OrbitCam, Sensitivity},
            limits::OrbitLimits,
            motion::ActiveGesture,
            MinimalOrbitCamPlugin, OrbitCamEvent,
        },
        input::{DefaultInputPlugin, OrbitCamInputMap},
        DefaultOrbitCamPlugins,
    };
}

use bevy_app::{PluginGroup, PluginGroupBuilder};

/// The controller systems together with the default mouse, touch, and
/// keyboard bindings.
pub struct DefaultOrbitCamPlugins;

impl PluginGroup for DefaultOrbitCamPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(controller::MinimalOrbitCamPlugin)
            .add(input::DefaultInputPlugin)
    }
}
