use cgmath::{InnerSpace, Vector3, Zero};

use crate::player::RigFrame;

/// How a control point blends into its neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpMode {
    Curve,
    Linear,
}

/// One control point of the teleport path, in rig-local space.
#[derive(Clone, Copy, Debug)]
pub struct ControlPoint {
    pub index: usize,
    pub position: Vector3<f32>,
    pub interp: InterpMode,
}

const LENGTH_SUBDIVISIONS: usize = 8;

/// Smooth curve through the teleport arc samples, expressed relative to
/// the rig root so the rendered arc rides along with the player frame.
///
/// The curve is rebuilt from scratch every frame: the sample count varies
/// frame to frame and diffing against stale points is not worth it for
/// paths of a few dozen points. Tangents and cumulative arc lengths are
/// cached on rebuild, before any segment reads positions out of the curve.
pub struct PathCurve {
    points: Vec<ControlPoint>,
    tangents: Vec<Vector3<f32>>,
    lengths: Vec<f32>,
}

impl PathCurve {
    pub fn new() -> PathCurve {
        PathCurve {
            points: Vec::new(),
            tangents: Vec::new(),
            lengths: Vec::new(),
        }
    }

    /// Replace the whole curve with `world_points` mapped into `frame`.
    pub fn rebuild(&mut self, world_points: &[Vector3<f32>], frame: &RigFrame) {
        self.clear();
        for (index, point) in world_points.iter().enumerate() {
            self.points.push(ControlPoint {
                index,
                position: frame.world_to_local(*point),
                interp: InterpMode::Curve,
            });
        }
        self.refresh_cache();
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.tangents.clear();
        self.lengths.clear();
    }

    /// Catmull-Rom tangents plus cumulative arc length at each point.
    fn refresh_cache(&mut self) {
        let n = self.points.len();

        self.tangents = (0..n)
            .map(|i| {
                if n < 2 {
                    Vector3::zero()
                } else if i == 0 {
                    self.points[1].position - self.points[0].position
                } else if i == n - 1 {
                    self.points[n - 1].position - self.points[n - 2].position
                } else {
                    (self.points[i + 1].position - self.points[i - 1].position) * 0.5
                }
            })
            .collect();

        self.lengths = Vec::with_capacity(n);
        let mut total = 0.0;
        for i in 0..n {
            if i > 0 {
                let mut previous = self.points[i - 1].position;
                for step in 1..=LENGTH_SUBDIVISIONS {
                    let t = step as f32 / LENGTH_SUBDIVISIONS as f32;
                    // refresh_cache runs after tangents, so eval is safe here.
                    let sample = self.eval_hermite(i - 1, t);
                    total += (sample - previous).magnitude();
                    previous = sample;
                }
            }
            self.lengths.push(total);
        }
    }

    fn eval_hermite(&self, segment: usize, t: f32) -> Vector3<f32> {
        let p0 = self.points[segment].position;
        let p1 = self.points[segment + 1].position;
        let m0 = self.tangents[segment];
        let m1 = self.tangents[segment + 1];

        let t2 = t * t;
        let t3 = t2 * t;
        p0 * (2.0 * t3 - 3.0 * t2 + 1.0)
            + m0 * (t3 - 2.0 * t2 + t)
            + p1 * (-2.0 * t3 + 3.0 * t2)
            + m1 * (t3 - t2)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    pub fn local_position(&self, index: usize) -> Option<Vector3<f32>> {
        self.points.get(index).map(|p| p.position)
    }

    pub fn world_position(&self, index: usize, frame: &RigFrame) -> Option<Vector3<f32>> {
        self.local_position(index)
            .map(|p| frame.local_to_world(p))
    }

    pub fn tangent(&self, index: usize) -> Option<Vector3<f32>> {
        self.tangents.get(index).copied()
    }

    /// Cubic Hermite position on `segment` at parameter `t` in 0..=1.
    pub fn eval_segment(&self, segment: usize, t: f32) -> Option<Vector3<f32>> {
        if segment + 1 >= self.points.len() {
            return None;
        }
        Some(self.eval_hermite(segment, t.clamp(0.0, 1.0)))
    }

    pub fn total_length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }
}

impl Default for PathCurve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{vec3, Deg, Quaternion, Rotation3};

    fn offset_frame() -> RigFrame {
        RigFrame {
            position: vec3(3.0, 0.5, -2.0),
            rotation: Quaternion::from_angle_y(Deg(90.0)),
        }
    }

    fn arc_samples() -> Vec<Vector3<f32>> {
        vec![
            vec3(0.0, 1.0, 0.0),
            vec3(0.0, 1.4, -1.0),
            vec3(0.0, 1.5, -2.0),
            vec3(0.0, 1.2, -3.0),
            vec3(0.0, 0.4, -4.0),
        ]
    }

    #[test]
    fn test_control_point_count_matches_samples() {
        let mut curve = PathCurve::new();
        curve.rebuild(&arc_samples(), &offset_frame());

        assert_eq!(curve.point_count(), 5);
        assert_eq!(curve.segment_count(), 4);
        for (i, point) in (0..5).filter_map(|i| curve.point(i)).enumerate() {
            assert_eq!(point.index, i);
            assert_eq!(point.interp, InterpMode::Curve);
        }
    }

    #[test]
    fn test_local_positions_round_trip_to_world() {
        let frame = offset_frame();
        let samples = arc_samples();
        let mut curve = PathCurve::new();
        curve.rebuild(&samples, &frame);

        for (i, sample) in samples.iter().enumerate() {
            let world = curve.world_position(i, &frame).unwrap();
            assert!((world - sample).magnitude() < 1e-4);
        }
    }

    #[test]
    fn test_rebuild_discards_previous_points() {
        let frame = offset_frame();
        let mut curve = PathCurve::new();
        curve.rebuild(&arc_samples(), &frame);
        curve.rebuild(&arc_samples()[..2], &frame);

        assert_eq!(curve.point_count(), 2);
        assert_eq!(curve.segment_count(), 1);
    }

    #[test]
    fn test_straight_line_tangents_and_length() {
        let frame = RigFrame {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        };
        let samples = vec![
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(2.0, 0.0, 0.0),
        ];
        let mut curve = PathCurve::new();
        curve.rebuild(&samples, &frame);

        for i in 0..3 {
            let tangent = curve.tangent(i).unwrap();
            assert!(tangent.x > 0.0);
            assert!(tangent.y.abs() < 1e-6 && tangent.z.abs() < 1e-6);
        }
        assert!((curve.total_length() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_eval_segment_hits_control_points() {
        let frame = offset_frame();
        let mut curve = PathCurve::new();
        curve.rebuild(&arc_samples(), &frame);

        let start = curve.eval_segment(1, 0.0).unwrap();
        let end = curve.eval_segment(1, 1.0).unwrap();
        assert!((start - curve.local_position(1).unwrap()).magnitude() < 1e-5);
        assert!((end - curve.local_position(2).unwrap()).magnitude() < 1e-5);
    }

    #[test]
    fn test_clear_empties_caches() {
        let mut curve = PathCurve::new();
        curve.rebuild(&arc_samples(), &offset_frame());
        curve.clear();

        assert!(curve.is_empty());
        assert_eq!(curve.segment_count(), 0);
        assert_eq!(curve.total_length(), 0.0);
        assert!(curve.tangent(0).is_none());
    }
}
