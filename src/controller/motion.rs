//! Which gesture, if any, is currently driving the camera.

use bevy_reflect::prelude::*;

/// The gesture currently routing input to the camera.
///
/// Exactly one gesture is active at a time, and transitions happen only on
/// discrete input start/end events; move samples never change the state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ActiveGesture {
    /// No gesture in progress. The resting state.
    #[default]
    Idle,
    /// Orbiting with the primary mouse button held.
    Rotating,
    /// Dollying with the secondary mouse button held.
    Dollying,
    /// Panning with the tertiary mouse button held.
    Panning,
    /// Orbiting with a one-finger touch.
    TouchRotating,
    /// Dollying with a two-finger pinch.
    TouchDollying,
    /// Panning with a three-finger swipe.
    TouchPanning,
}

impl ActiveGesture {
    /// No gesture is in progress.
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// The gesture is driven by a held mouse button.
    pub fn is_pointer(self) -> bool {
        matches!(self, Self::Rotating | Self::Dollying | Self::Panning)
    }

    /// The gesture is driven by touch contacts.
    pub fn is_touch(self) -> bool {
        matches!(
            self,
            Self::TouchRotating | Self::TouchDollying | Self::TouchPanning
        )
    }

    /// Wheel dollies are accepted while idle or rotating, so spinning the
    /// wheel mid-orbit works, but not while a drag-dolly or pan is held.
    pub fn accepts_wheel(self) -> bool {
        matches!(self, Self::Idle | Self::Rotating)
    }

    /// The touch contact count this gesture tracks, if it is a touch gesture.
    pub fn touch_fingers(self) -> Option<usize> {
        match self {
            Self::TouchRotating => Some(1),
            Self::TouchDollying => Some(2),
            Self::TouchPanning => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_is_accepted_only_while_idle_or_rotating() {
        assert!(ActiveGesture::Idle.accepts_wheel());
        assert!(ActiveGesture::Rotating.accepts_wheel());
        assert!(!ActiveGesture::Dollying.accepts_wheel());
        assert!(!ActiveGesture::Panning.accepts_wheel());
        assert!(!ActiveGesture::TouchRotating.accepts_wheel());
    }

    #[test]
    fn classification_is_disjoint() {
        for gesture in [
            ActiveGesture::Idle,
            ActiveGesture::Rotating,
            ActiveGesture::Dollying,
            ActiveGesture::Panning,
            ActiveGesture::TouchRotating,
            ActiveGesture::TouchDollying,
            ActiveGesture::TouchPanning,
        ] {
            let classes =
                [gesture.is_idle(), gesture.is_pointer(), gesture.is_touch()];
            assert_eq!(classes.iter().filter(|&&c| c).count(), 1);
        }
    }
}
