pub mod camera_fade;
pub mod logging;
pub mod scene;
pub mod timer;
pub mod util;

pub use camera_fade::CameraFade;
pub use timer::{TimerHandle, TimerQueue};
pub use util::{compute_view_matrix_from_render_context, EngineRenderContext};
