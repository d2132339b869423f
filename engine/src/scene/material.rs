use std::any::Any;

/// Surface/post-process parameters for a scene object. The host renderer
/// interprets concrete material types; game code mutates parameters through
/// the `Any` downcast.
pub trait Material {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
