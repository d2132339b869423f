// VR teleport locomotion.
//
// Point-and-teleport movement: a simulated projectile arcs out of the
// dominant hand, its landing point is validated against the walkable
// surface set, and the predicted path is rendered as a curved guide.
// Releasing the teleport button fades the view out, relocates the player,
// and fades back in.

pub mod arc_renderer;
pub mod path_curve;
pub mod segment_pool;
pub mod teleport_system;
pub mod trajectory;

pub use arc_renderer::{ArcRenderConfig, ArcRenderer};
pub use path_curve::{ControlPoint, InterpMode, PathCurve};
pub use segment_pool::{ArcSegmentPool, SegmentHandle, SegmentRenderer};
pub use teleport_system::{
    FadeService, Scheduler, TeleportButton, TeleportConfig, TeleportServices, TeleportSystem,
};
pub use trajectory::{ArcTrajectory, CollisionQuery, ProjectileParams, SweepHit};
