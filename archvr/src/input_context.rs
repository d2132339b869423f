use cgmath::{vec2, vec3, Quaternion, Vector2, Vector3};

use crate::vr_config::Handedness;

/// Tracked head pose, in tracking (rig-local) space.
#[derive(Clone, Debug)]
pub struct Head {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

/// Tracked controller pose and analog inputs, in tracking space.
#[derive(Clone, Debug)]
pub struct Hand {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub thumbstick: Vector2<f32>,
    pub trigger_value: f32,
    pub squeeze_value: f32,
    pub a_value: f32,
}

/// Per-frame input snapshot delivered by the runtime.
#[derive(Clone, Debug)]
pub struct InputContext {
    pub head: Head,
    pub left_hand: Hand,
    pub right_hand: Hand,
}

impl Hand {
    pub fn neutral() -> Hand {
        Hand {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            thumbstick: vec2(0.0, 0.0),
            trigger_value: 0.0,
            squeeze_value: 0.0,
            a_value: 0.0,
        }
    }
}

impl InputContext {
    /// All-zero input with identity orientations.
    pub fn neutral() -> InputContext {
        InputContext {
            head: Head {
                position: vec3(0.0, 0.0, 0.0),
                rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            },
            left_hand: Hand::neutral(),
            right_hand: Hand::neutral(),
        }
    }

    pub fn hand(&self, handedness: Handedness) -> &Hand {
        match handedness {
            Handedness::Left => &self.left_hand,
            Handedness::Right => &self.right_hand,
        }
    }
}
