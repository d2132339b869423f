use cgmath::{perspective, Deg, Matrix4, Quaternion, Rotation, Vector2, Vector3};

/// Per-frame camera state the renderer (and screen-space projections) need.
pub struct EngineRenderContext {
    pub camera_position: Vector3<f32>,
    pub camera_rotation: Quaternion<f32>,
    pub projection_matrix: Matrix4<f32>,
    pub screen_size: Vector2<f32>,
}

/// View matrix for a camera at `camera_position` with orientation
/// `camera_rotation` (camera looks down its local -Z).
pub fn compute_view_matrix_from_render_context(context: &EngineRenderContext) -> Matrix4<f32> {
    Matrix4::from(context.camera_rotation.invert())
        * Matrix4::from_translation(-context.camera_position)
}

pub fn perspective_projection(fov_y: Deg<f32>, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    perspective(fov_y, aspect, near, far)
}
