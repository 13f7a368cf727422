pub mod defaults;

/// Base class of the wrapper and prefix of every other class the widget writes.
pub const BASE_CLASS: &str = "custombox";
pub const OVERLAY_CLASS: &str = "custombox-overlay";
pub const CONTENT_CLASS: &str = "custombox-content";
pub const FULLSCREEN_CLASS: &str = "custombox-fullscreen";

pub const OPEN_CLASS: &str = "open";
pub const CLOSE_CLASS: &str = "close";

pub const TOP_CLASS: &str = "top";
pub const BOTTOM_CLASS: &str = "bottom";

/// Effects whose content pane is positioned at an edge before it animates.
pub const SLIDE_EFFECTS: &[&str] = &["slide"];

/// Lifecycle events are broadcast as `custombox:<name>`.
pub const EVENT_NAMESPACE: &str = "custombox";

// `Esc` is still reported by older engines
pub const ESCAPE_KEYS: &[&str] = &["Escape", "Esc"];

pub const TRANSITION_DURATION_PROPERTY: &str = "transition-duration";
pub const BACKGROUND_COLOR_PROPERTY: &str = "background-color";
pub const OPACITY_PROPERTY: &str = "opacity";
pub const WIDTH_PROPERTY: &str = "width";

pub const HTTP_OK: u16 = 200;
