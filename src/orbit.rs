//! 360° orbit viewer: drag-to-rotate over an ordered frame sequence, zoom, auto-play and a
//! contain-fit renderer.

pub(crate) mod frames;
pub(crate) mod render;
pub(crate) mod viewer;

pub use frames::FrameSet;
pub use render::{contain_fit, render_frame};
pub use viewer::{FrameSlot, OrbitViewer};
