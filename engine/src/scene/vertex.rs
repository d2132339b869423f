use cgmath::Vector3;

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct VertexPosition {
    pub position: Vector3<f32>,
}
