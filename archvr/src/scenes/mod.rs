// Demo level assembly for runtimes and integration tests.

use cgmath::{vec3, Vector3};

use crate::{
    navmesh::{NavCell, NavMesh},
    physics::{channels, PhysicsWorld},
};

pub struct DemoLevel {
    pub physics: PhysicsWorld,
    pub navmesh: NavMesh,
}

struct Platform {
    center: Vector3<f32>,
    half_x: f32,
    half_z: f32,
    walkable: bool,
}

/// Builds matched collision and walkable-surface data for a simple test
/// level: an optional ground floor plus any number of flat platforms.
pub struct DemoLevelBuilder {
    floor_half_extent: Option<f32>,
    platforms: Vec<Platform>,
}

impl DemoLevelBuilder {
    pub fn new() -> DemoLevelBuilder {
        DemoLevelBuilder {
            floor_half_extent: None,
            platforms: Vec::new(),
        }
    }

    /// 20 x 20 m walkable ground floor with its top at y = 0.
    pub fn with_default_floor(mut self) -> Self {
        self.floor_half_extent = Some(10.0);
        self
    }

    pub fn with_floor_half_extent(mut self, half_extent: f32) -> Self {
        self.floor_half_extent = Some(half_extent);
        self
    }

    /// A walkable platform whose top surface is at `top_center`.
    pub fn with_platform(mut self, top_center: Vector3<f32>, half_x: f32, half_z: f32) -> Self {
        self.platforms.push(Platform {
            center: top_center,
            half_x,
            half_z,
            walkable: true,
        });
        self
    }

    /// Solid geometry the arc collides with but cannot land on.
    pub fn with_obstacle(mut self, top_center: Vector3<f32>, half_x: f32, half_z: f32) -> Self {
        self.platforms.push(Platform {
            center: top_center,
            half_x,
            half_z,
            walkable: false,
        });
        self
    }

    pub fn build(self) -> DemoLevel {
        let mut physics = PhysicsWorld::new();
        let mut cells = Vec::new();

        const SLAB_HALF_THICKNESS: f32 = 0.05;

        if let Some(half_extent) = self.floor_half_extent {
            physics.add_static_cuboid(
                vec3(0.0, -SLAB_HALF_THICKNESS, 0.0),
                vec3(half_extent, SLAB_HALF_THICKNESS, half_extent),
                channels::STATIC_WORLD,
            );
            cells.push(NavCell::rectangle(
                vec3(0.0, 0.0, 0.0),
                half_extent,
                half_extent,
            ));
        }

        for platform in self.platforms {
            physics.add_static_cuboid(
                platform.center - vec3(0.0, SLAB_HALF_THICKNESS, 0.0),
                vec3(platform.half_x, SLAB_HALF_THICKNESS, platform.half_z),
                channels::STATIC_WORLD,
            );
            if platform.walkable {
                cells.push(NavCell::rectangle(
                    platform.center,
                    platform.half_x,
                    platform.half_z,
                ));
            }
        }

        DemoLevel {
            physics,
            navmesh: NavMesh::new(cells),
        }
    }
}

impl Default for DemoLevelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navmesh::SurfaceProjector;
    use crate::teleport::trajectory::CollisionQuery;

    #[test]
    fn test_default_floor_is_solid_and_walkable() {
        let level = DemoLevelBuilder::new().with_default_floor().build();

        assert_eq!(level.physics.collider_count(), 1);
        assert_eq!(level.navmesh.cell_count(), 1);

        let hit = level
            .physics
            .sweep_sphere(
                vec3(1.0, 2.0, 1.0),
                vec3(1.0, -1.0, 1.0),
                0.1,
                channels::STATIC_WORLD,
            )
            .unwrap();
        let projected = level
            .navmesh
            .project_point(hit.position, vec3(1.0, 1.0, 1.0))
            .unwrap();
        assert!((projected.y - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_obstacle_blocks_but_rejects_landing() {
        let level = DemoLevelBuilder::new()
            .with_obstacle(vec3(0.0, 2.0, -3.0), 0.5, 0.5)
            .build();

        let hit = level
            .physics
            .sweep_sphere(
                vec3(0.0, 2.5, -3.0),
                vec3(0.0, 1.0, -3.0),
                0.1,
                channels::STATIC_WORLD,
            )
            .unwrap();
        assert!(level
            .navmesh
            .project_point(hit.position, vec3(1.0, 1.0, 1.0))
            .is_none());
    }
}
