use std::time::Duration;

use cgmath::{vec3, Rotation, Vector3};
use engine::teleport_log;
use engine::timer::TimerHandle;
use serde::{Deserialize, Serialize};

use crate::{
    input_context::InputContext,
    navmesh::SurfaceProjector,
    player::PlayerRig,
    vr_config::Handedness,
    Effect,
};

use super::{
    path_curve::PathCurve,
    segment_pool::{ArcSegmentPool, SegmentRenderer},
    trajectory::{ArcTrajectory, CollisionQuery, ProjectileParams},
};

/// Configuration for the teleport system
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeleportConfig {
    pub enabled: bool,
    pub dominant_hand: Handedness,
    pub button_mapping: TeleportButton,
    pub trigger_threshold: f32,
    /// Launch speed of the targeting projectile, in m/s.
    pub projectile_speed: f32,
    /// Forward nudge of the launch point off the hand, in meters.
    pub launch_offset: f32,
    pub projectile: ProjectileParams,
    /// Per-axis walkable-surface search extent around the impact point.
    pub project_extent: Vector3<f32>,
    /// Fade-out (and fade-in) duration, in seconds.
    pub fade_time: f32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            dominant_hand: Handedness::Right,
            button_mapping: TeleportButton::Trigger,
            trigger_threshold: 0.5,
            projectile_speed: 8.0,
            launch_offset: 0.05,
            projectile: ProjectileParams::default(),
            project_extent: vec3(1.0, 1.0, 1.0),
            fade_time: 0.5,
        }
    }
}

/// Button mapping options for teleport activation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TeleportButton {
    Trigger,
    AButton,
    Squeeze,
}

/// Capability seam for the camera fade overlay.
pub trait FadeService {
    fn start_fade(&mut self, from_alpha: f32, to_alpha: f32, duration: Duration);
}

impl FadeService for engine::camera_fade::CameraFade {
    fn start_fade(&mut self, from_alpha: f32, to_alpha: f32, duration: Duration) {
        engine::camera_fade::CameraFade::start_fade(self, from_alpha, to_alpha, duration);
    }
}

/// Capability seam for one-shot deferred callbacks.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle;
    /// True exactly once, on the frame the timer fired.
    fn poll(&mut self, handle: TimerHandle) -> bool;
}

impl Scheduler for engine::timer::TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        engine::timer::TimerQueue::schedule(self, delay)
    }

    fn poll(&mut self, handle: TimerHandle) -> bool {
        engine::timer::TimerQueue::poll(self, handle)
    }
}

/// Engine services the teleport system draws on each frame.
pub struct TeleportServices<'a> {
    pub collision: &'a dyn CollisionQuery,
    pub surfaces: &'a dyn SurfaceProjector,
    pub renderer: &'a mut dyn SegmentRenderer,
    pub fade: &'a mut dyn FadeService,
    pub scheduler: &'a mut dyn Scheduler,
}

/// Teleport targeting and sequencing.
///
/// Every frame the dominant hand's pose launches a simulated projectile;
/// a validated landing rebuilds the path curve and the segment pool shows
/// the arc. Releasing the mapped button fades the camera out and schedules
/// the move; the deferred fire relocates the character and fades back in.
pub struct TeleportSystem {
    config: TeleportConfig,
    curve: PathCurve,
    pool: ArcSegmentPool,
    /// Most recent validated landing point.
    target: Option<Vector3<f32>>,
    target_valid_this_frame: bool,
    was_button_pressed: bool,
    pending_fire: Option<TimerHandle>,
}

impl TeleportSystem {
    pub fn new(config: TeleportConfig) -> TeleportSystem {
        TeleportSystem {
            config,
            curve: PathCurve::new(),
            pool: ArcSegmentPool::new(),
            target: None,
            target_valid_this_frame: false,
            was_button_pressed: false,
            pending_fire: None,
        }
    }

    pub fn with_default_config() -> TeleportSystem {
        Self::new(TeleportConfig::default())
    }

    pub fn update(
        &mut self,
        input: &InputContext,
        rig: &PlayerRig,
        services: &mut TeleportServices,
    ) -> Vec<Effect> {
        if !self.config.enabled {
            return vec![Effect::NoEffect];
        }

        let mut effects = Vec::new();

        // Resolve a pending fire first so the move lands on the exact frame
        // the fade completes.
        if let Some(effect) = self.poll_pending_fire(rig, services) {
            effects.push(effect);
        }

        self.update_targeting(input, rig, services);

        let hand = input.hand(self.config.dominant_hand);
        let button_value = match self.config.button_mapping {
            TeleportButton::Trigger => hand.trigger_value,
            TeleportButton::AButton => hand.a_value,
            TeleportButton::Squeeze => hand.squeeze_value,
        };
        let is_pressed = button_value >= self.config.trigger_threshold;
        let just_released = !is_pressed && self.was_button_pressed;
        self.was_button_pressed = is_pressed;

        if just_released {
            self.request_teleport(services);
        }

        if effects.is_empty() {
            vec![Effect::NoEffect]
        } else {
            effects
        }
    }

    fn poll_pending_fire(
        &mut self,
        rig: &PlayerRig,
        services: &mut TeleportServices,
    ) -> Option<Effect> {
        let handle = self.pending_fire?;
        if !services.scheduler.poll(handle) {
            return None;
        }
        self.pending_fire = None;

        let target = self.target?;
        let destination = target + vec3(0.0, rig.capsule_half_height(), 0.0);
        services
            .fade
            .start_fade(1.0, 0.0, self.fade_duration());
        teleport_log!(DEBUG, "teleport fired, destination {:?}", destination);

        Some(Effect::SetPlayerPosition {
            position: destination,
            is_teleport: true,
        })
    }

    /// Predict, validate, and refresh the arc visuals for this frame.
    fn update_targeting(
        &mut self,
        input: &InputContext,
        rig: &PlayerRig,
        services: &mut TeleportServices,
    ) {
        self.target_valid_this_frame = false;

        let frame = rig.frame();
        let hand = input.hand(self.config.dominant_hand);
        let aim = (frame.rotation * hand.rotation).rotate_vector(vec3(0.0, 0.0, -1.0));
        let launch = frame.local_to_world(hand.position) + aim * self.config.launch_offset;

        let trajectory = ArcTrajectory::predict(
            services.collision,
            &self.config.projectile,
            launch,
            aim * self.config.projectile_speed,
        );

        let landing = trajectory.hit.and_then(|hit| {
            services
                .surfaces
                .project_point(hit.position, self.config.project_extent)
        });

        match landing {
            Some(point) => {
                self.target = Some(point);
                self.target_valid_this_frame = true;
                self.curve.rebuild(&trajectory.points, &frame);
            }
            None => self.curve.clear(),
        }

        self.pool.update(&self.curve, services.renderer);
    }

    /// Begin a fade-gated teleport. Rejected while a sequence is pending
    /// or before any destination was ever validated.
    fn request_teleport(&mut self, services: &mut TeleportServices) -> bool {
        if self.pending_fire.is_some() {
            teleport_log!(DEBUG, "teleport request ignored, sequence already pending");
            return false;
        }
        if self.target.is_none() {
            teleport_log!(DEBUG, "teleport request ignored, no validated destination");
            return false;
        }

        let duration = self.fade_duration();
        services.fade.start_fade(0.0, 1.0, duration);
        self.pending_fire = Some(services.scheduler.schedule(duration));
        true
    }

    fn fade_duration(&self) -> Duration {
        Duration::from_secs_f32(self.config.fade_time.max(0.0))
    }

    pub fn current_target(&self) -> Option<Vector3<f32>> {
        self.target
    }

    /// True when this frame's computation produced a valid destination.
    pub fn has_valid_target(&self) -> bool {
        self.target_valid_this_frame
    }

    pub fn is_sequence_pending(&self) -> bool {
        self.pending_fire.is_some()
    }

    pub fn curve(&self) -> &PathCurve {
        &self.curve
    }

    pub fn pool(&self) -> &ArcSegmentPool {
        &self.pool
    }

    pub fn config(&self) -> &TeleportConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teleport::segment_pool::SegmentHandle;
    use crate::teleport::trajectory::SweepHit;
    use cgmath::{Deg, InnerSpace, Quaternion, Rotation3};
    use engine::timer::TimerQueue;

    struct FlatFloor;

    impl CollisionQuery for FlatFloor {
        fn sweep_sphere(
            &self,
            from: Vector3<f32>,
            to: Vector3<f32>,
            radius: f32,
            _channel_mask: u32,
        ) -> Option<SweepHit> {
            let surface = radius;
            if from.y < surface || to.y >= surface {
                return None;
            }
            let t = (from.y - surface) / (from.y - to.y);
            Some(SweepHit {
                position: from + (to - from) * t,
                normal: vec3(0.0, 1.0, 0.0),
            })
        }
    }

    struct SnapToFloor;

    impl SurfaceProjector for SnapToFloor {
        fn project_point(
            &self,
            point: Vector3<f32>,
            _extent: Vector3<f32>,
        ) -> Option<Vector3<f32>> {
            Some(vec3(point.x, 0.0, point.z))
        }
    }

    struct NoWalkableSurface;

    impl SurfaceProjector for NoWalkableSurface {
        fn project_point(
            &self,
            _point: Vector3<f32>,
            _extent: Vector3<f32>,
        ) -> Option<Vector3<f32>> {
            None
        }
    }

    struct NullRenderer {
        created: usize,
    }

    impl SegmentRenderer for NullRenderer {
        fn create_segment(&mut self) -> SegmentHandle {
            self.created += 1;
            SegmentHandle::new(self.created - 1)
        }

        fn set_segment_endpoints(
            &mut self,
            _handle: SegmentHandle,
            _start: Vector3<f32>,
            _start_tangent: Vector3<f32>,
            _end: Vector3<f32>,
            _end_tangent: Vector3<f32>,
        ) {
        }

        fn set_segment_visible(&mut self, _handle: SegmentHandle, _visible: bool) {}
    }

    #[derive(Default)]
    struct RecordingFade {
        fades: Vec<(f32, f32)>,
    }

    impl FadeService for RecordingFade {
        fn start_fade(&mut self, from_alpha: f32, to_alpha: f32, _duration: Duration) {
            self.fades.push((from_alpha, to_alpha));
        }
    }

    struct Harness {
        system: TeleportSystem,
        rig: PlayerRig,
        renderer: NullRenderer,
        fade: RecordingFade,
        timers: TimerQueue,
    }

    impl Harness {
        fn new() -> Harness {
            let mut rig = PlayerRig::new(vec3(0.0, 0.0, 0.0), 0.9);
            rig.set_head_pose(vec3(0.0, 1.6, 0.0), Quaternion::new(1.0, 0.0, 0.0, 0.0));
            Harness {
                system: TeleportSystem::with_default_config(),
                rig,
                renderer: NullRenderer { created: 0 },
                fade: RecordingFade::default(),
                timers: TimerQueue::new(),
            }
        }

        fn step(
            &mut self,
            dt: Duration,
            trigger_value: f32,
            surfaces: &dyn SurfaceProjector,
        ) -> Vec<Effect> {
            self.timers.update(dt);
            let mut services = TeleportServices {
                collision: &FlatFloor,
                surfaces,
                renderer: &mut self.renderer,
                fade: &mut self.fade,
                scheduler: &mut self.timers,
            };
            let mut input = InputContext::neutral();
            // Aim the right hand forward and down so the arc reaches the floor.
            input.right_hand.position = vec3(0.2, 1.2, -0.1);
            input.right_hand.rotation = Quaternion::from_angle_x(Deg(-30.0));
            input.right_hand.trigger_value = trigger_value;
            self.system.update(&input, &self.rig, &mut services)
        }
    }

    fn teleport_effects(effects: &[Effect]) -> Vec<Vector3<f32>> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::SetPlayerPosition { position, .. } => Some(*position),
                Effect::NoEffect => None,
            })
            .collect()
    }

    #[test]
    fn test_targeting_validates_and_builds_arc() {
        let mut harness = Harness::new();
        harness.step(Duration::from_millis(16), 1.0, &SnapToFloor);

        assert!(harness.system.has_valid_target());
        let target = harness.system.current_target().unwrap();
        assert_eq!(target.y, 0.0);
        assert!(target.z < 0.0);
        assert!(harness.system.curve().point_count() > 2);
        assert_eq!(
            harness.system.pool().visible_count(),
            harness.system.curve().segment_count()
        );
    }

    #[test]
    fn test_failed_validation_hides_arc_but_keeps_target() {
        let mut harness = Harness::new();
        harness.step(Duration::from_millis(16), 1.0, &SnapToFloor);
        let target = harness.system.current_target().unwrap();

        harness.step(Duration::from_millis(16), 1.0, &NoWalkableSurface);

        assert!(!harness.system.has_valid_target());
        assert_eq!(harness.system.pool().visible_count(), 0);
        assert!(harness.system.curve().is_empty());
        assert_eq!(harness.system.current_target(), Some(target));
    }

    #[test]
    fn test_release_fires_after_exact_fade_duration() {
        let mut harness = Harness::new();
        harness.step(Duration::from_millis(16), 1.0, &SnapToFloor);
        let target = harness.system.current_target().unwrap();

        // Release: fade out begins, nothing moves yet.
        let effects = harness.step(Duration::from_millis(16), 0.0, &SnapToFloor);
        assert!(teleport_effects(&effects).is_empty());
        assert_eq!(harness.fade.fades, vec![(0.0, 1.0)]);
        assert!(harness.system.is_sequence_pending());

        // 400 ms of the 500 ms fade: still pending.
        for _ in 0..4 {
            let effects = harness.step(Duration::from_millis(100), 0.0, &SnapToFloor);
            assert!(teleport_effects(&effects).is_empty());
        }

        // The frame that completes the fade moves the character once.
        let effects = harness.step(Duration::from_millis(100), 0.0, &SnapToFloor);
        let moves = teleport_effects(&effects);
        assert_eq!(moves.len(), 1);
        let expected = harness
            .system
            .current_target()
            .map(|t| t + vec3(0.0, 0.9, 0.0));
        // The destination reflects the target validated at fire time.
        assert!(moves[0].y == 0.9);
        assert!((moves[0] - expected.unwrap()).magnitude() < 0.5);
        assert!((moves[0].x - target.x).abs() < 0.5);

        // Fade back in was requested.
        assert_eq!(harness.fade.fades.len(), 2);
        assert_eq!(harness.fade.fades[1], (1.0, 0.0));
        assert!(!harness.system.is_sequence_pending());

        // No further moves on later frames.
        let effects = harness.step(Duration::from_millis(100), 0.0, &SnapToFloor);
        assert!(teleport_effects(&effects).is_empty());
    }

    #[test]
    fn test_release_without_target_is_rejected() {
        let mut harness = Harness::new();
        harness.step(Duration::from_millis(16), 1.0, &NoWalkableSurface);
        harness.step(Duration::from_millis(16), 0.0, &NoWalkableSurface);

        assert!(harness.fade.fades.is_empty());
        assert!(!harness.system.is_sequence_pending());
    }

    #[test]
    fn test_reentrant_request_is_rejected() {
        let mut harness = Harness::new();
        harness.step(Duration::from_millis(16), 1.0, &SnapToFloor);
        harness.step(Duration::from_millis(16), 0.0, &SnapToFloor);
        assert_eq!(harness.fade.fades.len(), 1);

        // Press and release again while the first sequence is pending.
        harness.step(Duration::from_millis(50), 1.0, &SnapToFloor);
        harness.step(Duration::from_millis(50), 0.0, &SnapToFloor);

        // No second fade-out was started.
        assert_eq!(harness.fade.fades.len(), 1);

        // Only one move fires in total.
        let mut moves = 0;
        for _ in 0..10 {
            let effects = harness.step(Duration::from_millis(100), 0.0, &SnapToFloor);
            moves += teleport_effects(&effects).len();
        }
        assert_eq!(moves, 1);
    }

    #[test]
    fn test_disabled_system_is_inert() {
        let mut harness = Harness::new();
        harness.system = TeleportSystem::new(TeleportConfig {
            enabled: false,
            ..TeleportConfig::default()
        });

        let effects = harness.step(Duration::from_millis(16), 1.0, &SnapToFloor);
        assert!(teleport_effects(&effects).is_empty());
        assert!(!harness.system.has_valid_target());
        assert_eq!(harness.renderer.created, 0);
    }
}
