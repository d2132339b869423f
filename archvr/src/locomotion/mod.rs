// Smooth locomotion and comfort turning.
//
// Continuous movement follows the head-relative horizontal axes so the
// thumbstick always means "where I am looking". Turning is discrete: a
// hard stick deflection yaws the rig by a fixed increment, and the stick
// has to return to center before another turn can fire. Fixed-angle turns
// avoid the vection discomfort of smoothly rotating a stationary player.

use std::time::Duration;

use cgmath::{Deg, InnerSpace, Vector3, Zero};
use engine::input_log;
use serde::{Deserialize, Serialize};

use crate::{input_context::InputContext, player::PlayerRig};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Movement speed in meters per second at full stick deflection.
    pub move_speed: f32,
    /// Yaw applied by one snap turn, in degrees.
    pub turn_increment: f32,
    /// Stick deflection that triggers a turn.
    pub turn_trigger_threshold: f32,
    /// Deflection below which the turn re-arms.
    pub turn_deadzone: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        LocomotionConfig {
            move_speed: 2.0,
            turn_increment: 30.0,
            turn_trigger_threshold: 0.7,
            turn_deadzone: 0.3,
        }
    }
}

pub struct LocomotionSystem {
    config: LocomotionConfig,
    turned: bool,
}

impl LocomotionSystem {
    pub fn new(config: LocomotionConfig) -> LocomotionSystem {
        LocomotionSystem {
            config,
            turned: false,
        }
    }

    pub fn update(&mut self, input: &InputContext, rig: &mut PlayerRig, dt: Duration) {
        let dt_secs = dt.as_secs_f32();
        if dt_secs <= 0.0 {
            return;
        }

        self.apply_movement(input, rig, dt_secs);
        self.apply_turn_axis(input.right_hand.thumbstick.x, rig);
    }

    fn apply_movement(&self, input: &InputContext, rig: &mut PlayerRig, dt_secs: f32) {
        let stick = input.left_hand.thumbstick;

        let mut forward = rig.camera_forward();
        forward.y = 0.0;
        let mut right = rig.camera_right();
        right.y = 0.0;
        if forward.magnitude2() > f32::EPSILON {
            forward = forward.normalize();
        }
        if right.magnitude2() > f32::EPSILON {
            right = right.normalize();
        }

        let displacement =
            (forward * stick.y + right * stick.x) * self.config.move_speed * dt_secs;
        rig.translate(displacement);
        rig.set_velocity(if displacement.is_zero() {
            Vector3::zero()
        } else {
            displacement / dt_secs
        });
    }

    /// Snap-turn state machine. Returns true when a turn executed this call.
    pub fn apply_turn_axis(&mut self, axis: f32, rig: &mut PlayerRig) -> bool {
        if axis > self.config.turn_trigger_threshold && !self.turned {
            self.execute_turn(1.0, rig);
            true
        } else if axis < -self.config.turn_trigger_threshold && !self.turned {
            self.execute_turn(-1.0, rig);
            true
        } else {
            if axis.abs() < self.config.turn_deadzone {
                self.turned = false;
            }
            false
        }
    }

    fn execute_turn(&mut self, direction: f32, rig: &mut PlayerRig) {
        // Stick-right is clockwise from above, i.e. negative yaw about +Y.
        rig.snap_turn(Deg(-direction * self.config.turn_increment));
        self.turned = true;
        input_log!(DEBUG, "snap turn executed, direction {}", direction);
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }
}
