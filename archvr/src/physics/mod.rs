// Static collision world for targeting queries.
//
// The locomotion core only ever asks one question of physics: what does a
// swept sphere hit first. Level geometry is registered as static rapier
// colliders tagged with channel groups; the teleport projectile filters
// by channel so decorative or pass-through geometry can opt out.

pub mod util;

use cgmath::{InnerSpace, Vector3};
use engine::physics_log;
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;

use crate::teleport::trajectory::{CollisionQuery, SweepHit};

/// Collision channel bits carried by colliders and query filters.
pub mod channels {
    /// Solid level geometry that blocks and receives teleports.
    pub const STATIC_WORLD: u32 = 1 << 0;
    /// Movable props; excluded from teleport targeting by default.
    pub const DYNAMIC: u32 = 1 << 1;
}

pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> PhysicsWorld {
        PhysicsWorld {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn add_static_cuboid(
        &mut self,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
        channel_mask: u32,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(util::vec_to_nvec(center))
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(channel_mask),
                Group::ALL,
            ))
            .build();
        let handle = self.colliders.insert(collider);
        self.refresh();
        physics_log!(DEBUG, "registered static cuboid at {:?}", center);
        handle
    }

    /// Register raw triangle geometry. Queries sweep against the actual
    /// triangles, so meshes with no simplified collision proxy still hit.
    pub fn add_static_trimesh(
        &mut self,
        vertices: Vec<Vector3<f32>>,
        indices: Vec<[u32; 3]>,
        channel_mask: u32,
    ) -> ColliderHandle {
        let points = vertices.into_iter().map(util::vec_to_npoint).collect();
        let collider = ColliderBuilder::trimesh(points, indices)
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(channel_mask),
                Group::ALL,
            ))
            .build();
        let handle = self.colliders.insert(collider);
        self.refresh();
        physics_log!(DEBUG, "registered static trimesh");
        handle
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn refresh(&mut self) {
        self.query_pipeline.update(&self.bodies, &self.colliders);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionQuery for PhysicsWorld {
    fn sweep_sphere(
        &self,
        from: Vector3<f32>,
        to: Vector3<f32>,
        radius: f32,
        channel_mask: u32,
    ) -> Option<SweepHit> {
        let delta = to - from;
        let distance = delta.magnitude();
        if distance <= f32::EPSILON {
            return None;
        }
        let direction = delta / distance;

        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(from.x, from.y, from.z);
        let shape_vel = util::vec_to_nvec(direction);
        let filter = QueryFilter::default().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(channel_mask),
        ));

        let (_, toi) = self.query_pipeline.cast_shape(
            &self.bodies,
            &self.colliders,
            &shape_pos,
            &shape_vel,
            &shape,
            ShapeCastOptions::with_max_time_of_impact(distance),
            filter,
        )?;

        // normal1 points out of the swept ball at the contact; the struck
        // surface faces the opposite way.
        Some(SweepHit {
            position: from + direction * toi.time_of_impact,
            normal: -util::nvec_to_cgmath(toi.normal1.into_inner()),
        })
    }
}
