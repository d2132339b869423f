use super::VertexPosition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTopology {
    Lines,
    Triangles,
}

/// Tessellated geometry handed to the host renderer for upload.
pub trait Geometry {
    fn topology(&self) -> PrimitiveTopology;
    fn positions(&self) -> &[VertexPosition];
}
