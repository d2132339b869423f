use super::{Geometry, PrimitiveTopology, VertexPosition};

pub struct LinesMesh {
    vertices: Vec<VertexPosition>,
}

pub fn create(raw_vertices: Vec<VertexPosition>) -> LinesMesh {
    LinesMesh {
        vertices: raw_vertices,
    }
}

impl Geometry for LinesMesh {
    fn topology(&self) -> PrimitiveTopology {
        PrimitiveTopology::Lines
    }

    fn positions(&self) -> &[VertexPosition] {
        &self.vertices
    }
}
