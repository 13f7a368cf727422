use std::rc::Rc;

use consts::{
    CLOSE_CLASS, CONTENT_CLASS, HTTP_OK, OPEN_CLASS, SLIDE_EFFECTS, TRANSITION_DURATION_PROPERTY,
    WIDTH_PROPERTY,
};
use utils::{Completion, DomError, FetchError, Surface, Transport};

use crate::config::{Animation, Edge};
use crate::error::ModalError;
use crate::Direction;

/// Targets starting with `#` or `.` are always treated as selectors.
pub fn is_selector_like(target: &str) -> bool {
    target.starts_with('#') || target.starts_with('.')
}

/// The visible pane holding cloned or fetched markup.
pub struct Content<S: Surface> {
    surface: S,
    transport: Rc<dyn Transport>,
    element: S::Element,
    effect: String,
    animation: Animation,
}

impl<S: Surface> Content<S> {
    pub fn new(
        surface: S,
        transport: Rc<dyn Transport>,
        speed: i64,
        effect: &str,
        animation: Animation,
    ) -> Result<Self, DomError> {
        let element = surface.create_element()?;
        surface.set_style(&element, TRANSITION_DURATION_PROPERTY, &format!("{speed}ms"));
        surface.add_class(&element, CONTENT_CLASS);

        let content = Self {
            surface,
            transport,
            element,
            effect: effect.to_string(),
            animation,
        };
        content.position(content.animation.from);
        Ok(content)
    }

    pub fn element(&self) -> &S::Element {
        &self.element
    }

    /// Populates the pane from `target`.
    ///
    /// An on-page match is cloned without its id. Failing that, anything not
    /// selector-like is loaded as a url. A selector-like target matching
    /// nothing is [`ModalError::TargetNotFound`].
    pub async fn fetch(&self, target: &str, width: Option<&str>) -> Result<(), ModalError> {
        if let Some(found) = self.surface.clone_matching(target) {
            self.surface.remove_attribute(&found, "id");
            if let Some(width) = width {
                self.surface.set_style(&found, WIDTH_PROPERTY, width);
            }
            self.surface.append_child(&self.element, &found)?;
            return Ok(());
        }

        if is_selector_like(target) {
            return Err(ModalError::TargetNotFound(target.to_string()));
        }

        log::debug!("loading modal content from {target}");
        let response = self.transport.get(target).await?;
        if response.status != HTTP_OK {
            return Err(FetchError::Status {
                status: response.status,
                status_text: response.status_text,
            }
            .into());
        }

        self.surface.insert_html(&self.element, &response.body)?;
        if let Some(width) = width {
            if let Some(first) = self.surface.first_element_child(&self.element) {
                self.surface.set_style(&first, WIDTH_PROPERTY, width);
            }
        }
        Ok(())
    }

    /// Starts the transition for `direction`; the returned signal fires on
    /// `transitionend`.
    pub fn bind(&self, direction: Direction) -> Completion {
        let done = self.surface.transition_end(&self.element);
        match direction {
            Direction::Close => {
                self.surface.remove_class(&self.element, OPEN_CLASS);
                self.surface.add_class(&self.element, CLOSE_CLASS);
                self.position(self.animation.to);
            }
            Direction::Open => {
                self.surface.add_class(&self.element, OPEN_CLASS);
            }
        }
        done
    }

    pub fn remove(&self) -> bool {
        self.surface.detach(&self.element)
    }

    /// Slide effects keep exactly one edge class on the pane.
    fn position(&self, edge: Edge) {
        if !SLIDE_EFFECTS.iter().any(|e| *e == self.effect) {
            return;
        }
        for stale in [Edge::Top, Edge::Bottom] {
            if self.surface.has_class(&self.element, stale.class()) {
                self.surface.remove_class(&self.element, stale.class());
            }
        }
        self.surface.add_class(&self.element, edge.class());
    }
}

#[cfg(test)]
mod tests {
    use utils::testing::{FakeElement, FakeSurface, FakeTransport};

    use super::*;

    fn content(surface: &FakeSurface, transport: &FakeTransport, effect: &str) -> Content<FakeSurface> {
        Content::new(
            surface.clone(),
            Rc::new(transport.clone()),
            400,
            effect,
            Animation {
                from: Edge::Bottom,
                to: Edge::Top,
            },
        )
        .unwrap()
    }

    #[test]
    fn selector_like_targets() {
        assert!(is_selector_like("#panel"));
        assert!(is_selector_like(".card"));
        assert!(!is_selector_like("ajax.html"));
        assert!(!is_selector_like("https://x/y.html"));
    }

    #[test]
    fn constructed_with_transition_duration() {
        let surface = FakeSurface::new();
        let content = content(&surface, &FakeTransport::new(), "fadein");

        assert!(content.element().has_class("custombox-content"));
        assert_eq!(
            content.element().style("transition-duration").as_deref(),
            Some("400ms")
        );
        assert!(!content.element().has_class("top"));
        assert!(!content.element().has_class("bottom"));
    }

    #[test]
    fn slide_effect_starts_at_from_edge() {
        let surface = FakeSurface::new();
        let content = content(&surface, &FakeTransport::new(), "slide");

        assert!(content.element().has_class("bottom"));
        assert!(!content.element().has_class("top"));
    }

    #[test]
    fn fetch_clones_page_element_without_id() {
        let surface = FakeSurface::new();
        surface.add_page_element(
            "#panel",
            FakeElement::new()
                .with_attribute("id", "panel")
                .with_class("panel"),
        );
        let transport = FakeTransport::new();
        let content = content(&surface, &transport, "fadein");

        surface
            .block_on(content.fetch("#panel", Some("320px")))
            .unwrap();

        let children = content.element().children();
        assert_eq!(children.len(), 1);
        assert!(children[0].has_class("panel"));
        assert_eq!(children[0].attribute("id"), None);
        assert_eq!(children[0].style("width").as_deref(), Some("320px"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn fetch_without_width_leaves_clone_unstyled() {
        let surface = FakeSurface::new();
        surface.add_page_element(".card", FakeElement::new());
        let content = content(&surface, &FakeTransport::new(), "fadein");

        surface.block_on(content.fetch(".card", None)).unwrap();

        assert_eq!(content.element().children()[0].style("width"), None);
    }

    #[test]
    fn page_match_wins_over_url_loading() {
        let surface = FakeSurface::new();
        surface.add_page_element("ajax.html", FakeElement::new());
        let transport = FakeTransport::new();
        transport.respond("ajax.html", 200, "OK", "<p>remote</p>");
        let content = content(&surface, &transport, "fadein");

        surface.block_on(content.fetch("ajax.html", None)).unwrap();

        assert!(transport.requests().is_empty());
        assert_eq!(content.element().children()[0].html(), "");
    }

    #[test]
    fn fetch_loads_url_and_sizes_first_child_only() {
        let surface = FakeSurface::new();
        let transport = FakeTransport::new();
        transport.respond(
            "https://x/y.html",
            200,
            "OK",
            "<div>first</div>\n<div>second</div>",
        );
        let content = content(&surface, &transport, "fadein");

        surface
            .block_on(content.fetch("https://x/y.html", Some("50%")))
            .unwrap();

        let children = content.element().children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].html(), "<div>first</div>");
        assert_eq!(children[0].style("width").as_deref(), Some("50%"));
        assert_eq!(children[1].style("width"), None);
        assert_eq!(transport.requests(), vec!["https://x/y.html"]);
    }

    #[test]
    fn fetch_rejects_non_success_status() {
        let surface = FakeSurface::new();
        let transport = FakeTransport::new();
        transport.respond("missing.html", 404, "Not Found", "");
        let content = content(&surface, &transport, "fadein");

        let err = surface
            .block_on(content.fetch("missing.html", None))
            .unwrap_err();

        assert_eq!(
            err,
            ModalError::Fetch(FetchError::Status {
                status: 404,
                status_text: "Not Found".into()
            })
        );
        assert!(err.to_string().contains("Not Found"));
        assert!(content.element().children().is_empty());
    }

    #[test]
    fn fetch_rejects_network_failure() {
        let surface = FakeSurface::new();
        let transport = FakeTransport::new();
        transport.fail("offline.html", "connection refused");
        let content = content(&surface, &transport, "fadein");

        let err = surface
            .block_on(content.fetch("offline.html", None))
            .unwrap_err();

        assert!(matches!(err, ModalError::Fetch(FetchError::Network(_))));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn unmatched_selector_is_not_found() {
        let surface = FakeSurface::new();
        let transport = FakeTransport::new();
        let content = content(&surface, &transport, "fadein");

        let err = surface
            .block_on(content.fetch("#nowhere", None))
            .unwrap_err();

        assert_eq!(err, ModalError::TargetNotFound("#nowhere".into()));
        assert!(err.to_string().contains("doesn't exist"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn bind_open_adds_open_class_and_waits_for_transition() {
        let surface = FakeSurface::new();
        let content = content(&surface, &FakeTransport::new(), "fadein");

        let _done = content.bind(Direction::Open);

        assert!(content.element().has_class("open"));
        assert_eq!(surface.pending_transitions(content.element()), 1);
    }

    #[test]
    fn bind_close_swaps_state_and_moves_to_exit_edge() {
        let surface = FakeSurface::new();
        let content = content(&surface, &FakeTransport::new(), "slide");

        let _opened = content.bind(Direction::Open);
        let _closed = content.bind(Direction::Close);

        let el = content.element();
        assert!(!el.has_class("open"));
        assert!(el.has_class("close"));
        assert!(el.has_class("top"));
        assert!(!el.has_class("bottom"));
    }

    #[test]
    fn removal_is_idempotent() {
        let surface = FakeSurface::new();
        let content = content(&surface, &FakeTransport::new(), "fadein");

        assert!(!content.remove());
        assert!(!content.remove());
    }
}
