//! Browser backed [`Surface`] and [`Transport`].

use consts::{HTTP_OK, OPACITY_PROPERTY, TRANSITION_DURATION_PROPERTY};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::net::http::Request;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, Window};

use crate::surface::{Completion, DomError, Surface};
use crate::transport::{FetchError, Response, Transport};

fn js_err(e: JsValue) -> DomError {
    DomError(format!("{e:?}"))
}

fn completion_on(target: &EventTarget, event_type: &'static str) -> Completion {
    let (tx, rx) = oneshot::channel();
    let listener = EventListener::once_with_options(
        target,
        event_type,
        EventListenerOptions::run_in_capture_phase(),
        move |_| {
            _ = tx.send(());
        },
    );
    async move {
        _ = rx.await;
        drop(listener);
    }
    .boxed_local()
}

#[derive(Clone)]
pub struct WebSurface {
    window: Window,
    document: Document,
}

impl WebSurface {
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or_else(|| DomError("no window available".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError("no document available".into()))?;
        Ok(Self { window, document })
    }

    /// Runs the opacity animation through the Web Animations API.
    fn animate_opacity(
        &self,
        element: &Element,
        from: f64,
        to: f64,
        duration_ms: i64,
    ) -> Result<Promise, JsValue> {
        let keyframes = Array::new();
        for opacity in [from, to] {
            let frame = Object::new();
            Reflect::set(&frame, &OPACITY_PROPERTY.into(), &JsValue::from_f64(opacity))?;
            keyframes.push(&frame);
        }
        let options = Object::new();
        Reflect::set(&options, &"duration".into(), &JsValue::from_f64(duration_ms as f64))?;
        Reflect::set(&options, &"fill".into(), &"forwards".into())?;

        let target: &JsValue = element.as_ref();
        let animate = Reflect::get(target, &"animate".into())?.dyn_into::<Function>()?;
        let animation = animate.call2(target, &keyframes, &options)?;
        Reflect::get(&animation, &"finished".into())?.dyn_into::<Promise>()
    }
}

impl Surface for WebSurface {
    type Element = Element;
    type Listener = EventListener;

    fn create_element(&self) -> Result<Element, DomError> {
        self.document.create_element("div").map_err(js_err)
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            log::warn!("failed to add class {class}: {e:?}");
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().remove_1(class) {
            log::warn!("failed to remove class {class}: {e:?}");
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        let Some(html) = element.dyn_ref::<HtmlElement>() else {
            log::warn!("cannot style non html element");
            return;
        };
        if let Err(e) = html.style().set_property(property, value) {
            log::warn!("failed to set {property}: {e:?}");
        }
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        _ = element.remove_attribute(name);
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent.append_child(child).map(|_| ()).map_err(js_err)
    }

    fn attach(&self, element: &Element) -> Result<(), DomError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| DomError("document has no body".into()))?;
        body.append_child(element).map(|_| ()).map_err(js_err)
    }

    fn detach(&self, element: &Element) -> bool {
        match element.parent_node() {
            Some(parent) => parent.remove_child(element).is_ok(),
            None => false,
        }
    }

    fn clone_matching(&self, selector: &str) -> Option<Element> {
        // invalid selectors (urls for instance) throw, which counts as no match
        let found = self.document.query_selector(selector).ok().flatten()?;
        found.clone_node_with_deep(true).ok()?.dyn_into::<Element>().ok()
    }

    fn insert_html(&self, element: &Element, html: &str) -> Result<(), DomError> {
        element
            .insert_adjacent_html("beforeend", html)
            .map_err(js_err)
    }

    fn first_element_child(&self, element: &Element) -> Option<Element> {
        element.first_element_child()
    }

    fn transition_duration(&self, element: &Element) -> String {
        self.window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(TRANSITION_DURATION_PROPERTY).ok())
            .unwrap_or_default()
    }

    fn transition_end(&self, element: &Element) -> Completion {
        completion_on(element, "transitionend")
    }

    fn fade(&self, element: &Element, from: f64, to: f64, duration_ms: i64) -> Completion {
        match self.animate_opacity(element, from, to, duration_ms) {
            Ok(finished) => {
                let finished = JsFuture::from(finished);
                async move {
                    if let Err(e) = finished.await {
                        log::warn!("overlay fade did not finish: {e:?}");
                    }
                }
                .boxed_local()
            }
            Err(e) => {
                log::warn!("overlay fade unavailable, jumping to {to}: {e:?}");
                self.set_style(element, OPACITY_PROPERTY, &to.to_string());
                futures::future::ready(()).boxed_local()
            }
        }
    }

    fn on_key_down(&self, handler: Box<dyn Fn(&str)>) -> EventListener {
        EventListener::new_with_options(
            &self.document,
            "keydown",
            EventListenerOptions::run_in_capture_phase(),
            move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    handler(&event.key());
                }
            },
        )
    }

    fn on_click(&self, element: &Element, handler: Box<dyn Fn()>) -> EventListener {
        EventListener::new_with_options(
            element,
            "click",
            EventListenerOptions::run_in_capture_phase(),
            move |_| handler(),
        )
    }

    fn broadcast(&self, event_type: &str) {
        let event = match Event::new(event_type) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("failed to create {event_type} event: {e:?}");
                return;
            }
        };
        if let Err(e) = self.document.dispatch_event(&event) {
            log::warn!("failed to dispatch {event_type}: {e:?}");
        }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, FetchError>> {
        let url = url.to_string();
        async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = response.status();
            let status_text = response.status_text();
            let body = if status == HTTP_OK {
                response
                    .text()
                    .await
                    .map_err(|e| FetchError::Network(e.to_string()))?
            } else {
                String::new()
            };

            Ok(Response {
                status,
                status_text,
                body,
            })
        }
        .boxed_local()
    }
}
