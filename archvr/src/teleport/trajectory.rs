use cgmath::{vec3, Vector3, Zero};
use serde::{Deserialize, Serialize};

/// Capability seam for swept collision tests. Implemented by
/// `physics::PhysicsWorld`; tests substitute analytic geometry.
pub trait CollisionQuery {
    /// Sweep a sphere from `from` to `to` and report the first hit against
    /// colliders matching `channel_mask`.
    fn sweep_sphere(
        &self,
        from: Vector3<f32>,
        to: Vector3<f32>,
        radius: f32,
        channel_mask: u32,
    ) -> Option<SweepHit>;
}

#[derive(Clone, Copy, Debug)]
pub struct SweepHit {
    /// Projectile center at the moment of impact.
    pub position: Vector3<f32>,
    /// Surface normal at the impact point.
    pub normal: Vector3<f32>,
}

/// Simulation parameters for the targeting projectile.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ProjectileParams {
    /// Collision radius of the simulated projectile, in meters.
    pub radius: f32,
    /// Downward acceleration, in m/s^2.
    pub gravity: f32,
    /// Simulation budget, in seconds of projectile flight.
    pub sim_time: f32,
    /// Sampling step, in seconds.
    pub time_step: f32,
    /// Collision channels the projectile tests against.
    pub channel_mask: u32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        ProjectileParams {
            radius: 0.1,
            gravity: 9.8,
            sim_time: 1.0,
            time_step: 1.0 / 60.0,
            channel_mask: crate::physics::channels::STATIC_WORLD,
        }
    }
}

/// Arc trajectory calculation for VR teleportation
#[derive(Clone, Debug)]
pub struct ArcTrajectory {
    /// Points along the arc trajectory, ending at the impact point when
    /// the projectile hit something.
    pub points: Vec<Vector3<f32>>,
    /// Terminal collision, if the arc struck geometry within the budget.
    pub hit: Option<SweepHit>,
}

impl ArcTrajectory {
    /// Simulate a projectile launched from `launch_position` with
    /// `launch_velocity`, sampling the closed-form parabola at the
    /// configured step and sweeping between consecutive samples.
    pub fn predict(
        query: &dyn CollisionQuery,
        params: &ProjectileParams,
        launch_position: Vector3<f32>,
        launch_velocity: Vector3<f32>,
    ) -> ArcTrajectory {
        if launch_velocity.is_zero() || params.sim_time <= 0.0 || params.time_step <= 0.0 {
            return ArcTrajectory {
                points: Vec::new(),
                hit: None,
            };
        }

        let steps = (params.sim_time / params.time_step).ceil() as usize;
        let mut points = Vec::with_capacity(steps + 1);
        points.push(launch_position);

        let mut previous = launch_position;
        for i in 1..=steps {
            let t = (i as f32 * params.time_step).min(params.sim_time);
            let position =
                Self::position_at_time(launch_position, launch_velocity, params.gravity, t);

            if let Some(hit) =
                query.sweep_sphere(previous, position, params.radius, params.channel_mask)
            {
                points.push(hit.position);
                return ArcTrajectory {
                    points,
                    hit: Some(hit),
                };
            }

            points.push(position);
            previous = position;
        }

        ArcTrajectory { points, hit: None }
    }

    /// Position at a specific time under the kinematic equation.
    fn position_at_time(
        start_position: Vector3<f32>,
        initial_velocity: Vector3<f32>,
        gravity: f32,
        time: f32,
    ) -> Vector3<f32> {
        vec3(
            start_position.x + initial_velocity.x * time,
            start_position.y + initial_velocity.y * time - 0.5 * gravity * time * time,
            start_position.z + initial_velocity.z * time,
        )
    }
}
