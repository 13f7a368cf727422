use futures::future::LocalBoxFuture;
use thiserror::Error;

/// Resolves once the animation or transition it was created for has finished.
pub type Completion = LocalBoxFuture<'static, ()>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DomError(pub String);

/// The page the modal is drawn on.
///
/// Every DOM write, animation, input listener and task the widget needs goes
/// through this trait, so the orchestration can run against the browser
/// ([`crate::web::WebSurface`]) or an in-memory page in tests.
///
/// Completion signals and listeners are registered when the method is
/// called, not when the returned value is first polled.
pub trait Surface: Clone + 'static {
    type Element: Clone + 'static;
    /// Keeps an input listener registered until dropped.
    type Listener: 'static;

    fn create_element(&self) -> Result<Self::Element, DomError>;

    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    fn remove_attribute(&self, element: &Self::Element, name: &str);

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), DomError>;
    /// Appends `element` to the page body.
    fn attach(&self, element: &Self::Element) -> Result<(), DomError>;
    /// Detaches `element` if it has a parent. Returns whether anything was removed.
    fn detach(&self, element: &Self::Element) -> bool;

    /// Deep clone of the first on-page element matching `selector`.
    ///
    /// Strings that are not valid selectors match nothing.
    fn clone_matching(&self, selector: &str) -> Option<Self::Element>;
    /// Parses `html` and appends the resulting nodes to `element`.
    fn insert_html(&self, element: &Self::Element, html: &str) -> Result<(), DomError>;
    fn first_element_child(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Computed `transition-duration` of `element`, empty when none is reported.
    fn transition_duration(&self, element: &Self::Element) -> String;
    /// Fires on the next `transitionend` seen on `element` or its descendants.
    fn transition_end(&self, element: &Self::Element) -> Completion;
    /// Animates the opacity of `element` from `from` to `to` and holds the final value.
    fn fade(&self, element: &Self::Element, from: f64, to: f64, duration_ms: i64) -> Completion;

    /// Page wide key-down delivery; the handler receives `KeyboardEvent.key`.
    fn on_key_down(&self, handler: Box<dyn Fn(&str)>) -> Self::Listener;
    fn on_click(&self, element: &Self::Element, handler: Box<dyn Fn()>) -> Self::Listener;

    /// Announces `event_type` to any listener on the page.
    fn broadcast(&self, event_type: &str);

    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
