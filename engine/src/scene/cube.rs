use cgmath::vec3;

use super::{Geometry, PrimitiveTopology, VertexPosition};

/// Unit cube centered at the origin, tessellated as triangles.
pub struct Cube {
    vertices: Vec<VertexPosition>,
}

const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

// Two triangles per face, counter-clockwise when seen from outside.
const FACES: [[usize; 6]; 6] = [
    [0, 2, 1, 0, 3, 2], // back
    [4, 5, 6, 4, 6, 7], // front
    [0, 4, 7, 0, 7, 3], // left
    [1, 6, 5, 1, 2, 6], // right
    [3, 7, 6, 3, 6, 2], // top
    [0, 1, 5, 0, 5, 4], // bottom
];

pub fn create() -> Cube {
    let mut vertices = Vec::with_capacity(36);
    for face in FACES {
        for idx in face {
            let [x, y, z] = CORNERS[idx];
            vertices.push(VertexPosition {
                position: vec3(x, y, z),
            });
        }
    }
    Cube { vertices }
}

impl Geometry for Cube {
    fn topology(&self) -> PrimitiveTopology {
        PrimitiveTopology::Triangles
    }

    fn positions(&self) -> &[VertexPosition] {
        &self.vertices
    }
}
