use std::time::Duration;

use cgmath::{vec3, Vector3};

/// Full-screen camera fade. `start_fade` begins an alpha ramp; `update`
/// advances it each frame. The alpha holds at the target once the ramp
/// completes, so a fade-to-opaque stays opaque until the next fade starts.
pub struct CameraFade {
    from_alpha: f32,
    to_alpha: f32,
    color: Vector3<f32>,
    duration: Duration,
    elapsed: Duration,
    active: bool,
}

impl CameraFade {
    pub fn new() -> CameraFade {
        CameraFade {
            from_alpha: 0.0,
            to_alpha: 0.0,
            color: vec3(0.0, 0.0, 0.0),
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
            active: false,
        }
    }

    pub fn start_fade(&mut self, from_alpha: f32, to_alpha: f32, duration: Duration) {
        self.from_alpha = from_alpha;
        self.to_alpha = to_alpha;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
        self.active = !duration.is_zero();
        if duration.is_zero() {
            self.from_alpha = to_alpha;
        }
    }

    pub fn update(&mut self, dt: Duration) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
        }
    }

    pub fn alpha(&self) -> f32 {
        if !self.active {
            return self.to_alpha;
        }
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from_alpha + (self.to_alpha - self.from_alpha) * t
    }

    pub fn is_fading(&self) -> bool {
        self.active
    }

    pub fn color(&self) -> Vector3<f32> {
        self.color
    }
}

impl Default for CameraFade {
    fn default() -> Self {
        Self::new()
    }
}
