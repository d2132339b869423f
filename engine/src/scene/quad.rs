use cgmath::vec3;

use super::{Geometry, PrimitiveTopology, VertexPosition};

/// Unit quad in the XY plane, centered at the origin.
pub struct Quad {
    vertices: Vec<VertexPosition>,
}

pub fn create() -> Quad {
    let corners = [
        vec3(-0.5, -0.5, 0.0),
        vec3(0.5, -0.5, 0.0),
        vec3(0.5, 0.5, 0.0),
        vec3(-0.5, -0.5, 0.0),
        vec3(0.5, 0.5, 0.0),
        vec3(-0.5, 0.5, 0.0),
    ];
    Quad {
        vertices: corners
            .into_iter()
            .map(|position| VertexPosition { position })
            .collect(),
    }
}

impl Geometry for Quad {
    fn topology(&self) -> PrimitiveTopology {
        PrimitiveTopology::Triangles
    }

    fn positions(&self) -> &[VertexPosition] {
        &self.vertices
    }
}
