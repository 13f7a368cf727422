use consts::{BACKGROUND_COLOR_PROPERTY, OPACITY_PROPERTY, OPEN_CLASS, OVERLAY_CLASS};
use utils::{Completion, DomError, Surface};

use crate::config::Settings;
use crate::Direction;

/// Dimming layer behind the content pane.
///
/// Fades between fully transparent and the configured opacity over the
/// configured overlay speed.
pub struct Overlay<S: Surface> {
    surface: S,
    element: S::Element,
    speed: i64,
    opacity: f64,
}

impl<S: Surface> Overlay<S> {
    pub fn new(surface: S, settings: &Settings) -> Result<Self, DomError> {
        let element = surface.create_element()?;
        surface.set_style(&element, BACKGROUND_COLOR_PROPERTY, &settings.overlay_color);
        surface.set_style(&element, OPACITY_PROPERTY, "0");
        surface.add_class(&element, OVERLAY_CLASS);
        Ok(Self {
            surface,
            element,
            speed: settings.overlay_speed,
            opacity: settings.overlay_opacity,
        })
    }

    pub fn element(&self) -> &S::Element {
        &self.element
    }

    /// Starts the fade for `direction`; the returned signal fires when it ends.
    pub fn bind(&self, direction: Direction) -> Completion {
        match direction {
            Direction::Close => {
                self.surface.remove_class(&self.element, OPEN_CLASS);
                self.surface
                    .fade(&self.element, self.opacity, 0.0, self.speed)
            }
            Direction::Open => {
                self.surface.add_class(&self.element, OPEN_CLASS);
                self.surface
                    .fade(&self.element, 0.0, self.opacity, self.speed)
            }
        }
    }

    pub fn remove(&self) -> bool {
        self.surface.detach(&self.element)
    }
}

#[cfg(test)]
mod tests {
    use utils::testing::FakeSurface;

    use super::*;
    use crate::config::Options;

    fn overlay(surface: &FakeSurface) -> Overlay<FakeSurface> {
        let settings = Settings::merge(
            Options::new("#panel")
                .overlay_color("#123")
                .overlay_opacity(0.8)
                .overlay_speed(250),
        );
        Overlay::new(surface.clone(), &settings).unwrap()
    }

    #[test]
    fn styled_with_configured_color_and_hidden() {
        let surface = FakeSurface::new();
        let overlay = overlay(&surface);

        assert!(overlay.element().has_class("custombox-overlay"));
        assert_eq!(
            overlay.element().style("background-color").as_deref(),
            Some("#123")
        );
        assert_eq!(overlay.element().style("opacity").as_deref(), Some("0"));
    }

    #[test]
    fn open_fades_in_to_target_opacity() {
        let surface = FakeSurface::new();
        let overlay = overlay(&surface);
        let el = overlay.element().clone();

        let _done = overlay.bind(Direction::Open);

        assert!(el.has_class("open"));
        assert!(surface
            .journal()
            .contains(&format!("fade {el:?} 0->0.8 250ms")));
        assert_eq!(surface.pending_fades(&el), 1);
    }

    #[test]
    fn close_drops_open_class_and_fades_out() {
        let surface = FakeSurface::new();
        let overlay = overlay(&surface);
        let el = overlay.element().clone();

        let _opened = overlay.bind(Direction::Open);
        let _closed = overlay.bind(Direction::Close);

        assert!(!el.has_class("open"));
        assert!(surface
            .journal()
            .contains(&format!("fade {el:?} 0.8->0 250ms")));
    }

    #[test]
    fn removal_is_idempotent() {
        let surface = FakeSurface::new();
        let overlay = overlay(&surface);

        assert!(!overlay.remove());
        surface.attach(overlay.element()).unwrap();
        assert!(overlay.remove());
        assert!(!overlay.remove());
    }
}
