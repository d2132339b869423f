// Speed-based comfort vignette.
//
// Artificial motion narrows the view: the faster the player glides, the
// smaller the clear aperture, and the aperture's focal point leads in the
// direction of travel so the periphery darkens where vection is worst.

use cgmath::{vec2, vec3, InnerSpace, Rotation, Vector2, Vector3, Vector4};
use engine::render_log;
use engine::scene::{SceneObject, VignetteMaterial};
use engine::{compute_view_matrix_from_render_context, EngineRenderContext};
use serde::{Deserialize, Serialize};

use crate::curve::FloatCurve;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BlinkerConfig {
    /// World-space distance of the focal lookahead point, in meters.
    pub lookahead_distance: f32,
}

impl Default for BlinkerConfig {
    fn default() -> Self {
        BlinkerConfig {
            lookahead_distance: 10.0,
        }
    }
}

/// Vignette parameters for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlinkerParams {
    pub radius: f32,
    pub centre: Vector2<f32>,
}

pub struct BlinkerSystem {
    config: BlinkerConfig,
    radius_vs_speed: Option<FloatCurve>,
}

impl BlinkerSystem {
    pub fn new(config: BlinkerConfig, radius_vs_speed: Option<FloatCurve>) -> BlinkerSystem {
        if radius_vs_speed.is_none() {
            render_log!(WARN, "no radius-vs-speed curve configured, vignette disabled");
        }
        BlinkerSystem {
            config,
            radius_vs_speed,
        }
    }

    /// Compute this frame's vignette, or `None` when the curve asset is
    /// missing and the feature is skipped.
    pub fn update(
        &self,
        velocity: Vector3<f32>,
        context: &EngineRenderContext,
    ) -> Option<BlinkerParams> {
        let curve = self.radius_vs_speed.as_ref()?;

        let speed = velocity.magnitude();
        let radius = curve.sample(speed);
        let centre = self.blinker_centre(velocity, context);

        Some(BlinkerParams { radius, centre })
    }

    /// Focal point: a fixed lookahead along the movement direction (behind
    /// it when moving backwards relative to the gaze), projected to
    /// normalized screen coordinates. Centered when stationary or when the
    /// projection fails.
    fn blinker_centre(&self, velocity: Vector3<f32>, context: &EngineRenderContext) -> Vector2<f32> {
        if velocity.magnitude2() < 1e-6 {
            return vec2(0.5, 0.5);
        }
        let direction = velocity.normalize();

        let camera_forward = context.camera_rotation.rotate_vector(vec3(0.0, 0.0, -1.0));
        let stationary_point = if camera_forward.dot(direction) > 0.0 {
            context.camera_position + direction * self.config.lookahead_distance
        } else {
            context.camera_position - direction * self.config.lookahead_distance
        };

        Self::project_to_screen(stationary_point, context).unwrap_or(vec2(0.5, 0.5))
    }

    fn project_to_screen(
        world_point: Vector3<f32>,
        context: &EngineRenderContext,
    ) -> Option<Vector2<f32>> {
        let view = compute_view_matrix_from_render_context(context);
        let clip = context.projection_matrix
            * view
            * Vector4::new(world_point.x, world_point.y, world_point.z, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }

        let ndc = vec2(clip.x / clip.w, clip.y / clip.w);
        // Normalized screen coordinates, origin top-left.
        Some(vec2(ndc.x * 0.5 + 0.5, 0.5 - ndc.y * 0.5))
    }
}

/// Write this frame's parameters into the vignette overlay's material.
pub fn write_params(overlay: &SceneObject, params: &BlinkerParams) {
    let mut material = overlay.material.borrow_mut();
    if let Some(vignette) = material.as_any_mut().downcast_mut::<VignetteMaterial>() {
        vignette.set_radius(params.radius);
        vignette.set_centre(params.centre);
    }
}
