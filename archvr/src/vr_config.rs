use serde::{Deserialize, Serialize};

/// Which tracked controller a binding refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}
