use cgmath::{vec3, InnerSpace, Matrix4, Quaternion, Vector3};
use engine::scene::{color_material, cube, lines_mesh, SceneObject, VertexPosition};

use super::segment_pool::{SegmentHandle, SegmentRenderer};

#[derive(Clone, Copy)]
pub struct ArcRenderConfig {
    pub arc_color: Vector3<f32>,
    pub marker_color: Vector3<f32>,
    pub marker_scale: Vector3<f32>,
    pub marker_height_offset: f32,
}

impl Default for ArcRenderConfig {
    fn default() -> Self {
        Self {
            arc_color: vec3(0.0, 0.8, 1.0),
            marker_color: vec3(0.1, 0.9, 1.0),
            marker_scale: vec3(0.3, 0.02, 0.3),
            marker_height_offset: 0.02,
        }
    }
}

struct ArcSegmentObject {
    object: SceneObject,
    visible: bool,
}

/// Scene-object backend for the arc segment pool. Every segment shares one
/// unit line geometry and the arc material; repositioning a segment only
/// rewrites its local transform, so a frame's worth of pool updates
/// allocates nothing.
pub struct ArcRenderer {
    config: ArcRenderConfig,
    segments: Vec<ArcSegmentObject>,
    marker: SceneObject,
}

impl ArcRenderer {
    pub fn new(config: ArcRenderConfig) -> ArcRenderer {
        let mut marker = SceneObject::new(
            color_material::create(config.marker_color),
            Box::new(cube::create()),
        );
        marker.set_depth_write(false);

        ArcRenderer {
            config,
            segments: Vec::new(),
            marker,
        }
    }

    fn make_segment_object(&self) -> SceneObject {
        let vertices = vec![
            VertexPosition {
                position: vec3(0.0, 0.0, 0.0),
            },
            VertexPosition {
                position: vec3(0.0, 0.0, 1.0),
            },
        ];
        let material = color_material::create(self.config.arc_color);
        let mesh = lines_mesh::create(vertices);
        let mut segment = SceneObject::new(material, Box::new(mesh));
        segment.set_depth_write(false);
        segment
    }

    /// Visible segments for this frame, parented under the rig root.
    pub fn scene_objects(&self, root_transform: Matrix4<f32>) -> Vec<SceneObject> {
        self.segments
            .iter()
            .filter(|segment| segment.visible)
            .map(|segment| {
                let mut object = segment.object.duplicate();
                object.set_transform(root_transform);
                object
            })
            .collect()
    }

    /// Landing indicator so players can see the destination.
    pub fn target_indicator(&self, position: Vector3<f32>) -> SceneObject {
        let translation = Matrix4::from_translation(
            position + vec3(0.0, self.config.marker_height_offset, 0.0),
        );
        let scale = Matrix4::from_nonuniform_scale(
            self.config.marker_scale.x,
            self.config.marker_scale.y,
            self.config.marker_scale.z,
        );

        let mut marker = self.marker.duplicate();
        marker.set_transform(translation * scale);
        marker
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl SegmentRenderer for ArcRenderer {
    fn create_segment(&mut self) -> SegmentHandle {
        self.segments.push(ArcSegmentObject {
            object: self.make_segment_object(),
            visible: false,
        });
        SegmentHandle::new(self.segments.len() - 1)
    }

    fn set_segment_endpoints(
        &mut self,
        handle: SegmentHandle,
        start: Vector3<f32>,
        _start_tangent: Vector3<f32>,
        end: Vector3<f32>,
        _end_tangent: Vector3<f32>,
    ) {
        // Straight chords between control points; the tangents are for
        // renderers that bend their segment mesh.
        let Some(segment) = self.segments.get_mut(handle.index()) else {
            return;
        };

        let chord = end - start;
        let length = chord.magnitude();
        if length <= f32::EPSILON {
            segment.object.set_local_transform(Matrix4::from_scale(0.0));
            return;
        }

        let rotation = Quaternion::from_arc(vec3(0.0, 0.0, 1.0), chord / length, None);
        let transform = Matrix4::from_translation(start)
            * Matrix4::from(rotation)
            * Matrix4::from_nonuniform_scale(1.0, 1.0, length);
        segment.object.set_local_transform(transform);
    }

    fn set_segment_visible(&mut self, handle: SegmentHandle, visible: bool) {
        if let Some(segment) = self.segments.get_mut(handle.index()) {
            segment.visible = visible;
        }
    }
}
