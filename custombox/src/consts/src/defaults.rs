//! Values used for every option the caller leaves unset.

pub const OVERLAY: bool = true;
pub const OVERLAY_SPEED_MS: i64 = 300;
pub const OVERLAY_COLOR: &str = "#000";
pub const OVERLAY_OPACITY: f64 = 0.5;
pub const OVERLAY_CLOSE: bool = true;

pub const SPEED_MS: i64 = 500;
pub const EFFECT: &str = "fadein";
pub const FULLSCREEN: bool = false;
