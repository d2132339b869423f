use cgmath::{vec3, Deg, Matrix4, Quaternion, Rotation, Rotation3, Vector3, Zero};

/// Snapshot of the rig's tracking-space origin: world position (on the
/// floor) plus yaw-only orientation.
#[derive(Clone, Copy, Debug)]
pub struct RigFrame {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl RigFrame {
    pub fn local_to_world(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.position + self.rotation.rotate_vector(point)
    }

    pub fn world_to_local(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.rotation.invert().rotate_vector(point - self.position)
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.rotation)
    }
}

/// The player's reference frame. The tracked head moves freely inside the
/// tracking space; locomotion and snap turns move the tracking-space origin
/// underneath it. The character's capsule position is derived from the head:
/// feet under the camera at the root's floor height, capsule center a
/// half-height above them.
pub struct PlayerRig {
    root: RigFrame,
    head_position: Vector3<f32>,
    head_rotation: Quaternion<f32>,
    capsule_half_height: f32,
    velocity: Vector3<f32>,
}

impl PlayerRig {
    pub fn new(spawn_position: Vector3<f32>, capsule_half_height: f32) -> PlayerRig {
        PlayerRig {
            root: RigFrame {
                position: spawn_position,
                rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            },
            head_position: vec3(0.0, 0.0, 0.0),
            head_rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            capsule_half_height,
            velocity: Vector3::zero(),
        }
    }

    /// Per-frame tracked head pose, in tracking space.
    pub fn set_head_pose(&mut self, position: Vector3<f32>, rotation: Quaternion<f32>) {
        self.head_position = position;
        self.head_rotation = rotation;
    }

    pub fn frame(&self) -> RigFrame {
        self.root
    }

    pub fn camera_position(&self) -> Vector3<f32> {
        self.root.local_to_world(self.head_position)
    }

    pub fn camera_rotation(&self) -> Quaternion<f32> {
        self.root.rotation * self.head_rotation
    }

    pub fn camera_forward(&self) -> Vector3<f32> {
        self.camera_rotation().rotate_vector(vec3(0.0, 0.0, -1.0))
    }

    pub fn camera_right(&self) -> Vector3<f32> {
        self.camera_rotation().rotate_vector(vec3(1.0, 0.0, 0.0))
    }

    pub fn translate(&mut self, delta: Vector3<f32>) {
        self.root.position += delta;
    }

    /// Yaw the tracking space around the viewpoint: rotate the root, then
    /// shift it by the horizontal camera displacement the rotation caused,
    /// so the camera itself does not visibly move.
    pub fn snap_turn(&mut self, yaw: Deg<f32>) {
        let camera_before = self.camera_position();

        self.root.rotation = Quaternion::from_angle_y(yaw) * self.root.rotation;

        let mut correction = camera_before - self.camera_position();
        correction.y = 0.0;
        self.root.position += correction;
    }

    /// Capsule-center position derived from the tracked head.
    pub fn character_position(&self) -> Vector3<f32> {
        let camera = self.camera_position();
        vec3(
            camera.x,
            self.root.position.y + self.capsule_half_height,
            camera.z,
        )
    }

    /// Move the rig so the derived capsule center lands on `position`.
    pub fn set_character_position(&mut self, position: Vector3<f32>) {
        let delta = position - self.character_position();
        self.root.position += delta;
    }

    pub fn capsule_half_height(&self) -> f32 {
        self.capsule_half_height
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn rig_with_offset_head() -> PlayerRig {
        let mut rig = PlayerRig::new(vec3(0.0, 0.0, 0.0), 0.9);
        rig.set_head_pose(vec3(0.3, 1.6, 0.2), Quaternion::new(1.0, 0.0, 0.0, 0.0));
        rig
    }

    #[test]
    fn test_snap_turn_preserves_camera_position() {
        let mut rig = rig_with_offset_head();
        let before = rig.camera_position();

        rig.snap_turn(Deg(-30.0));

        let after = rig.camera_position();
        assert!((before.x - after.x).abs() < 1e-4);
        assert!((before.z - after.z).abs() < 1e-4);
        assert!((before.y - after.y).abs() < 1e-4);
    }

    #[test]
    fn test_snap_turn_rotates_facing() {
        let mut rig = rig_with_offset_head();

        rig.snap_turn(Deg(-90.0));

        // Facing -Z, a -90 degree yaw turns the view to +X.
        let forward = rig.camera_forward();
        assert!((forward - vec3(1.0, 0.0, 0.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_character_position_tracks_head() {
        let rig = rig_with_offset_head();
        let character = rig.character_position();
        assert!((character - vec3(0.3, 0.9, 0.2)).magnitude() < 1e-5);
    }

    #[test]
    fn test_set_character_position() {
        let mut rig = rig_with_offset_head();
        let destination = vec3(4.0, 0.9, -2.0);

        rig.set_character_position(destination);

        assert!((rig.character_position() - destination).magnitude() < 1e-4);
        // The camera keeps its height above the tracking floor.
        assert!((rig.camera_position().y - 1.6).abs() < 1e-4);
    }

    #[test]
    fn test_frame_round_trip() {
        let mut rig = rig_with_offset_head();
        rig.snap_turn(Deg(-45.0));
        rig.translate(vec3(2.0, 0.0, -1.0));

        let frame = rig.frame();
        let world = vec3(1.5, 0.7, -3.25);
        let round_tripped = frame.local_to_world(frame.world_to_local(world));
        assert!((round_tripped - world).magnitude() < 1e-4);
    }
}
