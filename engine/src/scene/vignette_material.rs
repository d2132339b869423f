use std::any::Any;

use cgmath::{vec2, Vector2};

use super::Material;

/// Screen-periphery darkening post material. `radius` is the clear aperture
/// in normalized screen units; `centre` is the focal point in normalized
/// screen coordinates (0..1, origin top-left).
pub struct VignetteMaterial {
    radius: f32,
    centre: Vector2<f32>,
}

pub fn create(radius: f32) -> Box<dyn Material> {
    Box::new(VignetteMaterial {
        radius,
        centre: vec2(0.5, 0.5),
    })
}

impl VignetteMaterial {
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_centre(&mut self, centre: Vector2<f32>) {
        self.centre = centre;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn centre(&self) -> Vector2<f32> {
        self.centre
    }
}

impl Material for VignetteMaterial {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
