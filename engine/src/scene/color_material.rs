use std::any::Any;

use cgmath::Vector3;

use super::Material;

pub struct ColorMaterial {
    pub color: Vector3<f32>,
}

pub fn create(color: Vector3<f32>) -> Box<dyn Material> {
    Box::new(ColorMaterial { color })
}

impl Material for ColorMaterial {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
