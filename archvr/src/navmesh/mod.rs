// Walkable-surface queries for teleport landing validation.
//
// The navigation data is a flat list of convex horizontal floor cells.
// Projection clamps a query point onto the nearest cell surface, bounded
// by a per-axis search extent; teleports may only land on a projected
// point, so anything farther than the extent from every cell is rejected.

use cgmath::{vec2, vec3, InnerSpace, Vector2, Vector3};

/// Capability seam for walkable-surface projection. The teleport system
/// depends only on this trait; `NavMesh` is the built-in implementation.
pub trait SurfaceProjector {
    /// Nearest walkable point within `extent` of `point` on each axis,
    /// or `None` when no cell is close enough.
    fn project_point(&self, point: Vector3<f32>, extent: Vector3<f32>) -> Option<Vector3<f32>>;
}

/// A convex horizontal floor polygon. Vertices share one height; winding
/// may be either direction.
#[derive(Clone, Debug)]
pub struct NavCell {
    vertices: Vec<Vector3<f32>>,
    height: f32,
}

impl NavCell {
    pub fn new(vertices: Vec<Vector3<f32>>) -> NavCell {
        let height = vertices.first().map(|v| v.y).unwrap_or(0.0);
        NavCell { vertices, height }
    }

    /// Axis-aligned rectangular cell centered on `center`.
    pub fn rectangle(center: Vector3<f32>, half_x: f32, half_z: f32) -> NavCell {
        NavCell::new(vec![
            vec3(center.x - half_x, center.y, center.z - half_z),
            vec3(center.x + half_x, center.y, center.z - half_z),
            vec3(center.x + half_x, center.y, center.z + half_z),
            vec3(center.x - half_x, center.y, center.z + half_z),
        ])
    }

    fn contains_xz(&self, point: Vector2<f32>) -> bool {
        let n = self.vertices.len();
        let mut sign = 0.0f32;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let edge = vec2(b.x - a.x, b.z - a.z);
            let to_point = vec2(point.x - a.x, point.y - a.z);
            let cross = edge.x * to_point.y - edge.y * to_point.x;
            if cross.abs() <= f32::EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    fn closest_point_on_edges(&self, point: Vector2<f32>) -> Option<Vector2<f32>> {
        let n = self.vertices.len();
        let mut best: Option<(f32, Vector2<f32>)> = None;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let start = vec2(a.x, a.z);
            let edge = vec2(b.x - a.x, b.z - a.z);
            let length2 = edge.magnitude2();
            let t = if length2 <= f32::EPSILON {
                0.0
            } else {
                ((point - start).dot(edge) / length2).clamp(0.0, 1.0)
            };
            let candidate = start + edge * t;
            let distance2 = (point - candidate).magnitude2();
            if best.map_or(true, |(d, _)| distance2 < d) {
                best = Some((distance2, candidate));
            }
        }
        best.map(|(_, p)| p)
    }

    /// Nearest point on the cell surface, in world space.
    pub fn closest_point(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        if self.vertices.len() < 3 {
            return None;
        }
        let flat = vec2(point.x, point.z);
        let on_surface = if self.contains_xz(flat) {
            flat
        } else {
            self.closest_point_on_edges(flat)?
        };
        Some(vec3(on_surface.x, self.height, on_surface.y))
    }
}

/// The walkable-surface set for a level.
pub struct NavMesh {
    cells: Vec<NavCell>,
}

impl NavMesh {
    pub fn new(cells: Vec<NavCell>) -> NavMesh {
        NavMesh { cells }
    }

    pub fn add_cell(&mut self, cell: NavCell) {
        self.cells.push(cell);
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl SurfaceProjector for NavMesh {
    fn project_point(&self, point: Vector3<f32>, extent: Vector3<f32>) -> Option<Vector3<f32>> {
        let mut best: Option<(f32, Vector3<f32>)> = None;
        for cell in &self.cells {
            let Some(candidate) = cell.closest_point(point) else {
                continue;
            };
            let delta = candidate - point;
            if delta.x.abs() > extent.x || delta.y.abs() > extent.y || delta.z.abs() > extent.z {
                continue;
            }
            let distance2 = delta.magnitude2();
            if best.map_or(true, |(d, _)| distance2 < d) {
                best = Some((distance2, candidate));
            }
        }
        best.map(|(_, p)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_cell_mesh() -> NavMesh {
        NavMesh::new(vec![NavCell::rectangle(vec3(0.0, 0.0, 0.0), 2.0, 2.0)])
    }

    #[test]
    fn test_interior_point_snaps_to_surface() {
        let mesh = single_cell_mesh();
        let projected = mesh
            .project_point(vec3(0.5, 0.4, -0.5), vec3(1.0, 1.0, 1.0))
            .unwrap();
        assert!((projected - vec3(0.5, 0.0, -0.5)).magnitude() < 1e-5);
    }

    #[test]
    fn test_point_near_edge_clamps_to_boundary() {
        let mesh = single_cell_mesh();
        let projected = mesh
            .project_point(vec3(2.5, 0.0, 0.0), vec3(1.0, 1.0, 1.0))
            .unwrap();
        assert!((projected - vec3(2.0, 0.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_point_beyond_extent_fails() {
        let mesh = single_cell_mesh();
        assert!(mesh
            .project_point(vec3(4.0, 0.0, 0.0), vec3(1.0, 1.0, 1.0))
            .is_none());
        assert!(mesh
            .project_point(vec3(0.0, 2.0, 0.0), vec3(1.0, 1.0, 1.0))
            .is_none());
    }

    #[test]
    fn test_nearest_cell_wins() {
        let mesh = NavMesh::new(vec![
            NavCell::rectangle(vec3(0.0, 0.0, 0.0), 1.0, 1.0),
            NavCell::rectangle(vec3(3.0, 0.5, 0.0), 1.0, 1.0),
        ]);
        let projected = mesh
            .project_point(vec3(2.6, 0.5, 0.0), vec3(1.0, 1.0, 1.0))
            .unwrap();
        assert!((projected - vec3(2.6, 0.5, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_triangle_cell_containment() {
        let cell = NavCell::new(vec![
            vec3(0.0, 1.0, 0.0),
            vec3(2.0, 1.0, 0.0),
            vec3(0.0, 1.0, 2.0),
        ]);
        let inside = cell.closest_point(vec3(0.4, 1.3, 0.4)).unwrap();
        assert!((inside - vec3(0.4, 1.0, 0.4)).magnitude() < 1e-5);

        let outside = cell.closest_point(vec3(-1.0, 1.0, -1.0)).unwrap();
        assert!((outside - vec3(0.0, 1.0, 0.0)).magnitude() < 1e-5);
    }
}
