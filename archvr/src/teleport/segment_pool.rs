use cgmath::Vector3;

use super::path_curve::PathCurve;

/// Handle to a renderer-owned arc segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentHandle(usize);

impl SegmentHandle {
    pub fn new(index: usize) -> SegmentHandle {
        SegmentHandle(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Capability seam for the arc's renderable segments: create once,
/// reposition and toggle visibility every frame.
pub trait SegmentRenderer {
    fn create_segment(&mut self) -> SegmentHandle;

    fn set_segment_endpoints(
        &mut self,
        handle: SegmentHandle,
        start: Vector3<f32>,
        start_tangent: Vector3<f32>,
        end: Vector3<f32>,
        end_tangent: Vector3<f32>,
    );

    fn set_segment_visible(&mut self, handle: SegmentHandle, visible: bool);
}

/// Pool of reusable arc segments. Segments are created lazily up to the
/// largest path seen so far and never destroyed; each frame hides the
/// whole pool, then reveals and repositions exactly the segments the
/// current curve needs. Steady-state allocation is therefore bounded by
/// the high-water mark of the path length.
pub struct ArcSegmentPool {
    handles: Vec<SegmentHandle>,
    visible_count: usize,
}

impl ArcSegmentPool {
    pub fn new() -> ArcSegmentPool {
        ArcSegmentPool {
            handles: Vec::new(),
            visible_count: 0,
        }
    }

    /// Sync the pool to `curve`, reading endpoint positions and tangents
    /// from adjacent control points.
    pub fn update(&mut self, curve: &PathCurve, renderer: &mut dyn SegmentRenderer) {
        for &handle in &self.handles {
            renderer.set_segment_visible(handle, false);
        }

        let needed = curve.segment_count();
        while self.handles.len() < needed {
            self.handles.push(renderer.create_segment());
        }

        for i in 0..needed {
            let (Some(start), Some(start_tangent), Some(end), Some(end_tangent)) = (
                curve.local_position(i),
                curve.tangent(i),
                curve.local_position(i + 1),
                curve.tangent(i + 1),
            ) else {
                break;
            };
            renderer.set_segment_endpoints(self.handles[i], start, start_tangent, end, end_tangent);
            renderer.set_segment_visible(self.handles[i], true);
        }

        self.visible_count = needed;
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn pool_size(&self) -> usize {
        self.handles.len()
    }
}

impl Default for ArcSegmentPool {
    fn default() -> Self {
        Self::new()
    }
}
