use engine::game_log;
use serde::{Deserialize, Serialize};

/// A single keyframe of a scalar lookup curve.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Keyframed scalar curve with clamped linear sampling, used for tuning
/// lookups such as vignette-radius-versus-speed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FloatCurve {
    keys: Vec<CurveKey>,
}

impl FloatCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> FloatCurve {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        FloatCurve { keys }
    }

    /// Sample the curve at `t`, clamping outside the keyed range.
    pub fn sample(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let alpha = (t - a.time) / span;
                return a.value + (b.value - a.value) * alpha;
            }
        }
        self.keys[self.keys.len() - 1].value
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Parse a curve from JSON (`{"keys": [{"time": .., "value": ..}, ..]}`).
    /// Malformed or empty data yields `None`; callers treat that as a missing
    /// asset and skip the dependent feature.
    pub fn from_json_str(json: &str) -> Option<FloatCurve> {
        match serde_json::from_str::<FloatCurve>(json) {
            Ok(curve) if !curve.keys.is_empty() => Some(FloatCurve::new(curve.keys)),
            Ok(_) => {
                game_log!(WARN, "curve asset has no keys, ignoring");
                None
            }
            Err(err) => {
                game_log!(WARN, "failed to parse curve asset: {}", err);
                None
            }
        }
    }

    pub fn from_json_file(path: &std::path::Path) -> Option<FloatCurve> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_str(&json),
            Err(err) => {
                game_log!(WARN, "failed to read curve asset {}: {}", path.display(), err);
                None
            }
        }
    }
}
