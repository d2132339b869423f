use cgmath::prelude::*;
use cgmath::Matrix4;

use std::cell::RefCell;
use std::rc::Rc;

use super::{Geometry, Material};

/// A renderable: shared material and geometry plus a two-level transform.
/// The final placement is `transform * local_transform`, so a group of
/// objects can be parented by writing the same outer transform to each.
#[derive(Clone)]
pub struct SceneObject {
    pub material: Rc<RefCell<Box<dyn Material>>>,
    pub geometry: Rc<Box<dyn Geometry>>,
    pub transform: Matrix4<f32>,
    pub local_transform: Matrix4<f32>,
    pub depth_write: bool,
}

impl SceneObject {
    pub fn new(material: Box<dyn Material>, geometry: Box<dyn Geometry>) -> SceneObject {
        SceneObject {
            material: Rc::new(RefCell::new(material)),
            geometry: Rc::new(geometry),
            transform: Matrix4::identity(),
            local_transform: Matrix4::identity(),
            depth_write: true,
        }
    }

    /// Shallow copy sharing material and geometry with the original.
    pub fn duplicate(&self) -> SceneObject {
        SceneObject {
            material: self.material.clone(),
            geometry: self.geometry.clone(),
            transform: self.transform,
            local_transform: self.local_transform,
            depth_write: self.depth_write,
        }
    }

    /// Get the world position of this scene object from its transform matrix
    pub fn get_world_position(&self) -> cgmath::Vector3<f32> {
        let final_transform = self.transform * self.local_transform;
        cgmath::Vector3::new(
            final_transform[3][0],
            final_transform[3][1],
            final_transform[3][2],
        )
    }

    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    pub fn set_local_transform(&mut self, transform: Matrix4<f32>) {
        self.local_transform = transform;
    }

    pub fn get_transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn set_depth_write(&mut self, enabled: bool) {
        self.depth_write = enabled;
    }
}
