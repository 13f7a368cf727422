use consts::{BASE_CLASS, FULLSCREEN_CLASS};
use utils::{DomError, Surface};

/// Outermost container holding the overlay and the content pane.
pub struct Wrapper<S: Surface> {
    surface: S,
    element: S::Element,
}

impl<S: Surface> Wrapper<S> {
    pub fn new(surface: S, effect: &str, fullscreen: bool) -> Result<Self, DomError> {
        let element = surface.create_element()?;
        surface.add_class(&element, BASE_CLASS);
        surface.add_class(&element, effect);
        if fullscreen {
            surface.add_class(&element, FULLSCREEN_CLASS);
        }
        Ok(Self { surface, element })
    }

    pub fn element(&self) -> &S::Element {
        &self.element
    }

    pub fn remove(&self) -> bool {
        self.surface.detach(&self.element)
    }
}

#[cfg(test)]
mod tests {
    use utils::testing::FakeSurface;

    use super::*;

    #[test]
    fn tags_base_effect_and_fullscreen() {
        let surface = FakeSurface::new();
        let wrapper = Wrapper::new(surface.clone(), "fadein", true).unwrap();
        assert_eq!(
            wrapper.element().classes(),
            vec!["custombox", "fadein", "custombox-fullscreen"]
        );

        let windowed = Wrapper::new(surface, "slide", false).unwrap();
        assert_eq!(windowed.element().classes(), vec!["custombox", "slide"]);
    }

    #[test]
    fn removal_is_idempotent() {
        let surface = FakeSurface::new();
        let wrapper = Wrapper::new(surface.clone(), "fadein", false).unwrap();

        assert!(!wrapper.remove());
        surface.attach(wrapper.element()).unwrap();
        assert!(wrapper.remove());
        assert!(!wrapper.remove());
    }
}
