//! Ambient animated background: sky gradients, drifting clouds and rain
//! streaks driven by a per-frame render loop.

pub mod clouds;
pub mod controller;
pub mod particles;
pub mod scene;
pub mod surface;
pub mod theme;

pub use controller::{AnimationController, ControllerConfig, FrameScheduler, Viewport};
pub use theme::{Theme, ThemeParseError, ThemeProfile};
