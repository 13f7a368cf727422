use consts::{defaults, BOTTOM_CLASS, TOP_CLASS};
use serde::Deserialize;
use utils::Hook;

/// Edge a sliding content pane enters from or leaves towards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    #[default]
    Top,
    Bottom,
}

impl Edge {
    pub fn class(self) -> &'static str {
        match self {
            Edge::Top => TOP_CLASS,
            Edge::Bottom => BOTTOM_CLASS,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub from: Edge,
    #[serde(default)]
    pub to: Edge,
}

/// Caller supplied options. Anything left `None` falls back to the defaults
/// when merged into [`Settings`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Selector of an on-page element to clone, or a url to load.
    pub target: String,

    pub overlay: Option<bool>,
    pub overlay_speed: Option<i64>,
    pub overlay_color: Option<String>,
    pub overlay_opacity: Option<f64>,
    pub overlay_close: Option<bool>,

    pub speed: Option<i64>,
    pub effect: Option<String>,
    pub width: Option<String>,
    pub fullscreen: Option<bool>,
    pub animation: Option<Animation>,

    #[serde(skip)]
    pub open: Option<Hook>,
    #[serde(skip)]
    pub complete: Option<Hook>,
    #[serde(skip)]
    pub close: Option<Hook>,
}

impl Options {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn overlay_speed(mut self, ms: i64) -> Self {
        self.overlay_speed = Some(ms);
        self
    }

    pub fn overlay_color(mut self, color: impl Into<String>) -> Self {
        self.overlay_color = Some(color.into());
        self
    }

    pub fn overlay_opacity(mut self, opacity: f64) -> Self {
        self.overlay_opacity = Some(opacity);
        self
    }

    pub fn overlay_close(mut self, overlay_close: bool) -> Self {
        self.overlay_close = Some(overlay_close);
        self
    }

    pub fn speed(mut self, ms: i64) -> Self {
        self.speed = Some(ms);
        self
    }

    pub fn effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = Some(fullscreen);
        self
    }

    pub fn animation(mut self, from: Edge, to: Edge) -> Self {
        self.animation = Some(Animation { from, to });
        self
    }

    pub fn on_open(mut self, hook: impl Into<Hook>) -> Self {
        self.open = Some(hook.into());
        self
    }

    pub fn on_complete(mut self, hook: impl Into<Hook>) -> Self {
        self.complete = Some(hook.into());
        self
    }

    pub fn on_close(mut self, hook: impl Into<Hook>) -> Self {
        self.close = Some(hook.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Hooks {
    pub open: Option<Hook>,
    pub complete: Option<Hook>,
    pub close: Option<Hook>,
}

/// Complete configuration of one modal, fixed once the modal is built.
#[derive(Clone, Debug)]
pub struct Settings {
    pub target: String,

    pub overlay: bool,
    pub overlay_speed: i64,
    pub overlay_color: String,
    pub overlay_opacity: f64,
    pub overlay_close: bool,

    pub speed: i64,
    pub effect: String,
    pub width: Option<String>,
    pub fullscreen: bool,
    pub animation: Animation,

    pub hooks: Hooks,
}

impl Settings {
    /// Overlays `options` onto the defaults, field by field.
    ///
    /// Values are not validated; out of range durations or malformed
    /// targets surface later as animation or fetch failures.
    pub fn merge(options: Options) -> Self {
        Self {
            target: options.target,
            overlay: options.overlay.unwrap_or(defaults::OVERLAY),
            overlay_speed: options.overlay_speed.unwrap_or(defaults::OVERLAY_SPEED_MS),
            overlay_color: options
                .overlay_color
                .unwrap_or_else(|| defaults::OVERLAY_COLOR.to_string()),
            overlay_opacity: options.overlay_opacity.unwrap_or(defaults::OVERLAY_OPACITY),
            overlay_close: options.overlay_close.unwrap_or(defaults::OVERLAY_CLOSE),
            speed: options.speed.unwrap_or(defaults::SPEED_MS),
            effect: options
                .effect
                .unwrap_or_else(|| defaults::EFFECT.to_string()),
            width: options.width,
            fullscreen: options.fullscreen.unwrap_or(defaults::FULLSCREEN),
            animation: options.animation.unwrap_or_default(),
            hooks: Hooks {
                open: options.open,
                complete: options.complete,
                close: options.close,
            },
        }
    }
}
