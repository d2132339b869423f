// VR walkthrough locomotion.
//
// The `Game` facade owns the player rig and the locomotion, teleport, and
// comfort-vignette systems. A host runtime drives it with one
// `update(&Time, &InputContext)` per frame and draws whatever `render`
// returns; collision and walkable-surface queries are supplied by the host
// through the capability seams.

pub mod blinker;
pub mod curve;
pub mod input_context;
pub mod locomotion;
pub mod navmesh;
pub mod physics;
pub mod player;
pub mod scenes;
pub mod teleport;
pub mod time;
pub mod vr_config;

use cgmath::{vec3, Deg, Vector3, Zero};
use engine::scene::{quad, vignette_material, SceneObject};
use engine::util::perspective_projection;
use engine::{game_log, CameraFade, EngineRenderContext, TimerQueue};
use serde::{Deserialize, Serialize};

use blinker::{BlinkerConfig, BlinkerSystem};
use curve::FloatCurve;
use input_context::InputContext;
use locomotion::{LocomotionConfig, LocomotionSystem};
use navmesh::SurfaceProjector;
use player::PlayerRig;
use teleport::{
    ArcRenderConfig, ArcRenderer, CollisionQuery, TeleportConfig, TeleportServices, TeleportSystem,
};
use time::Time;

/// State change requested by a system, applied by the game at the end of
/// the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    SetPlayerPosition {
        position: Vector3<f32>,
        is_teleport: bool,
    },
    NoEffect,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameOptions {
    pub spawn_position: Vector3<f32>,
    pub capsule_half_height: f32,
    pub fov_y_degrees: f32,
    pub aspect_ratio: f32,
    pub locomotion: LocomotionConfig,
    pub teleport: TeleportConfig,
    pub blinker: BlinkerConfig,
    /// Vignette radius keyed by speed. Absent curve disables the vignette.
    pub blinker_curve: Option<FloatCurve>,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            spawn_position: vec3(0.0, 0.0, 0.0),
            capsule_half_height: 0.9,
            fov_y_degrees: 90.0,
            aspect_ratio: 1.0,
            locomotion: LocomotionConfig::default(),
            teleport: TeleportConfig::default(),
            blinker: BlinkerConfig::default(),
            blinker_curve: None,
        }
    }
}

impl GameOptions {
    /// Load tuning overrides from a JSON file; any failure keeps defaults.
    pub fn from_json_file(path: &std::path::Path) -> Option<GameOptions> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                game_log!(WARN, "failed to read options {}: {}", path.display(), err);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(options) => Some(options),
            Err(err) => {
                game_log!(WARN, "failed to parse options {}: {}", path.display(), err);
                None
            }
        }
    }
}

pub struct Game {
    rig: PlayerRig,
    locomotion: LocomotionSystem,
    teleport: TeleportSystem,
    blinker: BlinkerSystem,
    collision: Box<dyn CollisionQuery>,
    surfaces: Box<dyn SurfaceProjector>,
    arc_renderer: ArcRenderer,
    fade: CameraFade,
    timers: TimerQueue,
    vignette: SceneObject,
    vignette_active: bool,
    projection_fov_y: Deg<f32>,
    aspect_ratio: f32,
}

impl Game {
    pub fn init(
        options: GameOptions,
        collision: Box<dyn CollisionQuery>,
        surfaces: Box<dyn SurfaceProjector>,
    ) -> Game {
        game_log!(
            INFO,
            "initializing locomotion at spawn {:?}",
            options.spawn_position
        );

        let vignette = SceneObject::new(vignette_material::create(1.0), Box::new(quad::create()));

        Game {
            rig: PlayerRig::new(options.spawn_position, options.capsule_half_height),
            locomotion: LocomotionSystem::new(options.locomotion),
            teleport: TeleportSystem::new(options.teleport),
            blinker: BlinkerSystem::new(options.blinker, options.blinker_curve),
            collision,
            surfaces,
            arc_renderer: ArcRenderer::new(ArcRenderConfig::default()),
            fade: CameraFade::new(),
            timers: TimerQueue::new(),
            vignette,
            vignette_active: false,
            projection_fov_y: Deg(options.fov_y_degrees),
            aspect_ratio: options.aspect_ratio,
        }
    }

    /// Frame entry point. Within one frame: services advance, movement and
    /// turning apply, teleport targeting validates and rebuilds the arc,
    /// the sequencer polls its timer, and the vignette updates last.
    pub fn update(&mut self, time: &Time, input: &InputContext) {
        let dt = time.elapsed;

        self.timers.update(dt);
        self.fade.update(dt);

        self.rig.set_head_pose(input.head.position, input.head.rotation);
        self.locomotion.update(input, &mut self.rig, dt);

        let mut services = TeleportServices {
            collision: self.collision.as_ref(),
            surfaces: self.surfaces.as_ref(),
            renderer: &mut self.arc_renderer,
            fade: &mut self.fade,
            scheduler: &mut self.timers,
        };
        let effects = self.teleport.update(input, &self.rig, &mut services);
        for effect in effects {
            self.apply_effect(effect);
        }

        let context = self.render_context();
        match self.blinker.update(self.rig.velocity(), &context) {
            Some(params) => {
                blinker::write_params(&self.vignette, &params);
                self.vignette_active = true;
            }
            None => self.vignette_active = false,
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SetPlayerPosition { position, .. } => {
                self.rig.set_character_position(position);
                self.rig.set_velocity(Vector3::zero());
            }
            Effect::NoEffect => {}
        }
    }

    /// This frame's visible scene objects: the teleport arc under the rig
    /// root, the destination marker when a target validated, and the
    /// vignette overlay when the blinker is live.
    pub fn render(&self) -> Vec<SceneObject> {
        let mut scene = Vec::new();

        let root_transform = self.rig.frame().to_matrix();
        scene.extend(self.arc_renderer.scene_objects(root_transform));

        if self.teleport.has_valid_target() {
            if let Some(target) = self.teleport.current_target() {
                scene.push(self.arc_renderer.target_indicator(target));
            }
        }

        if self.vignette_active {
            scene.push(self.vignette.duplicate());
        }

        scene
    }

    pub fn render_context(&self) -> EngineRenderContext {
        EngineRenderContext {
            camera_position: self.rig.camera_position(),
            camera_rotation: self.rig.camera_rotation(),
            projection_matrix: perspective_projection(
                self.projection_fov_y,
                self.aspect_ratio,
                0.1,
                1000.0,
            ),
            screen_size: cgmath::vec2(1.0, 1.0),
        }
    }

    pub fn fade_alpha(&self) -> f32 {
        self.fade.alpha()
    }

    pub fn player_position(&self) -> Vector3<f32> {
        self.rig.character_position()
    }

    pub fn rig(&self) -> &PlayerRig {
        &self.rig
    }

    pub fn teleport(&self) -> &TeleportSystem {
        &self.teleport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKey;
    use crate::scenes::DemoLevelBuilder;
    use cgmath::{vec2, InnerSpace, Quaternion, Rotation3};
    use std::time::Duration;

    fn demo_game(with_curve: bool) -> Game {
        let level = DemoLevelBuilder::new().with_default_floor().build();
        let options = GameOptions {
            blinker_curve: with_curve.then(|| {
                FloatCurve::new(vec![
                    CurveKey {
                        time: 0.0,
                        value: 0.8,
                    },
                    CurveKey {
                        time: 3.0,
                        value: 0.3,
                    },
                ])
            }),
            ..GameOptions::default()
        };
        Game::init(options, Box::new(level.physics), Box::new(level.navmesh))
    }

    fn standing_input() -> InputContext {
        let mut input = InputContext::neutral();
        input.head.position = vec3(0.0, 1.6, 0.0);
        input
    }

    fn step(game: &mut Game, input: &InputContext, total: &mut Duration, dt: Duration) {
        *total += dt;
        let time = Time {
            elapsed: dt,
            total: *total,
        };
        game.update(&time, input);
    }

    #[test]
    fn test_smooth_locomotion_moves_player() {
        let mut game = demo_game(true);
        let mut total = Duration::ZERO;
        let mut input = standing_input();
        input.left_hand.thumbstick = vec2(0.0, 1.0);

        for _ in 0..60 {
            step(&mut game, &input, &mut total, Duration::from_millis(16));
        }

        // Roughly a second of 2 m/s forward drift along -Z.
        let position = game.player_position();
        assert!(position.z < -1.5);
        assert!(position.x.abs() < 1e-3);
    }

    #[test]
    fn test_teleport_flow_end_to_end() {
        let mut game = demo_game(false);
        let mut total = Duration::ZERO;

        let mut aiming = standing_input();
        aiming.right_hand.position = vec3(0.2, 1.2, -0.1);
        aiming.right_hand.rotation = Quaternion::from_angle_x(Deg(-30.0));
        aiming.right_hand.trigger_value = 1.0;

        step(&mut game, &aiming, &mut total, Duration::from_millis(16));

        assert!(game.teleport().has_valid_target());
        let target = game.teleport().current_target().unwrap();
        assert!(target.z < -0.5);
        assert!((target.y - 0.0).abs() < 1e-3);

        // Arc plus destination marker are in the frame's scene.
        let scene = game.render();
        assert!(scene.len() >= 2);

        // Release and ride out the fade.
        let mut released = aiming.clone();
        released.right_hand.trigger_value = 0.0;
        step(&mut game, &released, &mut total, Duration::from_millis(16));
        assert!(game.fade_alpha() < 1.0);

        for _ in 0..5 {
            step(&mut game, &released, &mut total, Duration::from_millis(100));
        }

        let position = game.player_position();
        assert!((position.y - 0.9).abs() < 1e-3);
        assert!((vec3(position.x, 0.0, position.z) - vec3(target.x, 0.0, target.z)).magnitude() < 0.5);

        // Fade-in is underway on the next frame.
        step(&mut game, &released, &mut total, Duration::from_millis(100));
        assert!(game.fade_alpha() < 1.0);
    }

    #[test]
    fn test_vignette_overlay_follows_curve_presence() {
        let mut with_curve = demo_game(true);
        let mut without_curve = demo_game(false);
        let mut total = Duration::ZERO;
        let input = standing_input();

        step(&mut with_curve, &input, &mut total, Duration::from_millis(16));
        let mut total2 = Duration::ZERO;
        step(
            &mut without_curve,
            &input,
            &mut total2,
            Duration::from_millis(16),
        );

        // Identical frames except for the vignette overlay.
        assert_eq!(
            with_curve.render().len(),
            without_curve.render().len() + 1
        );
    }

    #[test]
    fn test_snap_turn_keeps_camera_in_place() {
        let mut game = demo_game(false);
        let mut total = Duration::ZERO;

        let mut input = standing_input();
        step(&mut game, &input, &mut total, Duration::from_millis(16));
        let camera_before = game.rig().camera_position();

        input.right_hand.thumbstick = vec2(1.0, 0.0);
        step(&mut game, &input, &mut total, Duration::from_millis(16));

        let camera_after = game.rig().camera_position();
        assert!((camera_before - camera_after).magnitude() < 1e-3);

        // The view itself rotated by the turn increment.
        let forward = game.rig().camera_forward();
        assert!(forward.x.abs() > 0.4);
    }

    #[test]
    fn test_options_round_trip_through_json() {
        let options = GameOptions::default();
        let json = serde_json::to_string(&options).unwrap();
        let parsed: GameOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.capsule_half_height, options.capsule_half_height);
        assert_eq!(parsed.locomotion.move_speed, options.locomotion.move_speed);
    }
}
