//! In-memory page and network used to drive the modal natively.
//!
//! [`FakeSurface`] records every DOM write in a journal and keeps animation
//! completions pending until the test ends them explicitly, so ordering can
//! be asserted step by step. Spawned tasks run on a [`LocalPool`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

use consts::TRANSITION_DURATION_PROPERTY;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use futures::FutureExt;

use crate::surface::{Completion, DomError, Surface};
use crate::transport::{FetchError, Response, Transport};

static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(Default)]
struct Node {
    id: usize,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    children: Vec<FakeElement>,
    parent: Option<Weak<RefCell<Node>>>,
    html: String,
}

#[derive(Clone)]
pub struct FakeElement(Rc<RefCell<Node>>);

impl FakeElement {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(Node {
            id: NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed),
            ..Default::default()
        })))
    }

    pub fn with_attribute(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.0.borrow_mut().classes.push(class.to_string());
        self
    }

    pub fn with_child(self, child: FakeElement) -> Self {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child);
        self
    }

    pub fn id(&self) -> usize {
        self.0.borrow().id
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn children(&self) -> Vec<FakeElement> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<FakeElement> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(FakeElement)
    }

    pub fn html(&self) -> String {
        self.0.borrow().html.clone()
    }

    fn deep_clone(&self) -> Self {
        let node = self.0.borrow();
        let copy = Self::new();
        {
            let mut c = copy.0.borrow_mut();
            c.classes = node.classes.clone();
            c.styles = node.styles.clone();
            c.attributes = node.attributes.clone();
            c.html = node.html.clone();
        }
        node.children
            .iter()
            .fold(copy, |copy, child| copy.with_child(child.deep_clone()))
    }
}

impl Default for FakeElement {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.id())
    }
}

type KeyHandler = Rc<dyn Fn(&str)>;
type ClickHandler = Rc<dyn Fn()>;

struct State {
    body: FakeElement,
    page: Vec<(String, FakeElement)>,
    journal: Vec<String>,
    transition_waiters: Vec<(usize, oneshot::Sender<()>)>,
    fade_waiters: Vec<(usize, oneshot::Sender<()>)>,
    key_handlers: Vec<(u64, KeyHandler)>,
    click_handlers: Vec<(u64, usize, ClickHandler)>,
    next_listener: u64,
    broadcasts: Vec<String>,
    report_transitions: bool,
}

impl State {
    fn log(&mut self, entry: String) {
        self.journal.push(entry);
    }
}

/// Removes its handler from the fake page when dropped.
pub struct FakeListener {
    state: Weak<RefCell<State>>,
    id: u64,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.borrow_mut();
            state.key_handlers.retain(|(id, _)| *id != self.id);
            state.click_handlers.retain(|(id, _, _)| *id != self.id);
        }
    }
}

#[derive(Clone)]
pub struct FakeSurface {
    state: Rc<RefCell<State>>,
    pool: Rc<RefCell<LocalPool>>,
    spawner: LocalSpawner,
}

impl FakeSurface {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            state: Rc::new(RefCell::new(State {
                body: FakeElement::new(),
                page: Vec::new(),
                journal: Vec::new(),
                transition_waiters: Vec::new(),
                fade_waiters: Vec::new(),
                key_handlers: Vec::new(),
                click_handlers: Vec::new(),
                next_listener: 0,
                broadcasts: Vec::new(),
                report_transitions: true,
            })),
            pool: Rc::new(RefCell::new(pool)),
            spawner,
        }
    }

    /// Makes `element` findable through `selector`.
    pub fn add_page_element(&self, selector: &str, element: FakeElement) {
        self.state
            .borrow_mut()
            .page
            .push((selector.to_string(), element));
    }

    /// When off, computed transition durations read back empty.
    pub fn set_report_transitions(&self, report: bool) {
        self.state.borrow_mut().report_transitions = report;
    }

    pub fn body(&self) -> FakeElement {
        self.state.borrow().body.clone()
    }

    pub fn is_attached(&self, element: &FakeElement) -> bool {
        let body = self.body();
        let mut current = element.parent();
        while let Some(node) = current {
            if node == body {
                return true;
            }
            current = node.parent();
        }
        false
    }

    pub fn journal(&self) -> Vec<String> {
        self.state.borrow().journal.clone()
    }

    /// Position of the first journal entry equal to `entry`.
    pub fn journal_position(&self, entry: &str) -> Option<usize> {
        self.state.borrow().journal.iter().position(|e| e == entry)
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.state.borrow().broadcasts.clone()
    }

    pub fn listener_count(&self) -> usize {
        let state = self.state.borrow();
        state.key_handlers.len() + state.click_handlers.len()
    }

    pub fn pending_transitions(&self, element: &FakeElement) -> usize {
        let id = element.id();
        self.state
            .borrow()
            .transition_waiters
            .iter()
            .filter(|(eid, _)| *eid == id)
            .count()
    }

    pub fn pending_fades(&self, element: &FakeElement) -> usize {
        let id = element.id();
        self.state
            .borrow()
            .fade_waiters
            .iter()
            .filter(|(eid, _)| *eid == id)
            .count()
    }

    /// Fires `transitionend` on `element` and runs whatever became ready.
    pub fn end_transition(&self, element: &FakeElement) -> bool {
        let fired = Self::release(&self.state, element, |s| &mut s.transition_waiters);
        if fired {
            self.state
                .borrow_mut()
                .log(format!("transition-end {element:?}"));
        }
        self.run_until_stalled();
        fired
    }

    /// Finishes the running fade on `element` and runs whatever became ready.
    pub fn end_fade(&self, element: &FakeElement) -> bool {
        let fired = Self::release(&self.state, element, |s| &mut s.fade_waiters);
        if fired {
            self.state.borrow_mut().log(format!("fade-end {element:?}"));
        }
        self.run_until_stalled();
        fired
    }

    pub fn press_key(&self, key: &str) {
        let handlers: Vec<KeyHandler> = self
            .state
            .borrow()
            .key_handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(key);
        }
        self.run_until_stalled();
    }

    pub fn click(&self, element: &FakeElement) {
        let id = element.id();
        let handlers: Vec<ClickHandler> = self
            .state
            .borrow()
            .click_handlers
            .iter()
            .filter(|(_, eid, _)| *eid == id)
            .map(|(_, _, h)| h.clone())
            .collect();
        for handler in handlers {
            handler();
        }
        self.run_until_stalled();
    }

    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Drives `future` and the spawned tasks to completion.
    ///
    /// Only for futures that do not wait on animations.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.pool.borrow_mut().run_until(future)
    }

    fn release(
        state: &Rc<RefCell<State>>,
        element: &FakeElement,
        waiters: impl Fn(&mut State) -> &mut Vec<(usize, oneshot::Sender<()>)>,
    ) -> bool {
        let id = element.id();
        let ready: Vec<oneshot::Sender<()>> = {
            let mut state = state.borrow_mut();
            let list = waiters(&mut state);
            let (ready, pending): (Vec<_>, Vec<_>) = std::mem::take(list)
                .into_iter()
                .partition(|(eid, _)| *eid == id);
            *list = pending;
            ready.into_iter().map(|(_, tx)| tx).collect()
        };
        let fired = !ready.is_empty();
        for tx in ready {
            _ = tx.send(());
        }
        fired
    }

    fn waiter(rx: oneshot::Receiver<()>) -> Completion {
        async move {
            _ = rx.await;
        }
        .boxed_local()
    }

    fn listener(&self) -> (u64, FakeListener) {
        let mut state = self.state.borrow_mut();
        let id = state.next_listener;
        state.next_listener += 1;
        (
            id,
            FakeListener {
                state: Rc::downgrade(&self.state),
                id,
            },
        )
    }
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for FakeSurface {
    type Element = FakeElement;
    type Listener = FakeListener;

    fn create_element(&self) -> Result<FakeElement, DomError> {
        let element = FakeElement::new();
        self.state
            .borrow_mut()
            .log(format!("create {element:?}"));
        Ok(element)
    }

    fn add_class(&self, element: &FakeElement, class: &str) {
        if !element.has_class(class) {
            element.0.borrow_mut().classes.push(class.to_string());
        }
        self.state
            .borrow_mut()
            .log(format!("class+ {element:?} {class}"));
    }

    fn remove_class(&self, element: &FakeElement, class: &str) {
        element.0.borrow_mut().classes.retain(|c| c != class);
        self.state
            .borrow_mut()
            .log(format!("class- {element:?} {class}"));
    }

    fn has_class(&self, element: &FakeElement, class: &str) -> bool {
        element.has_class(class)
    }

    fn set_style(&self, element: &FakeElement, property: &str, value: &str) {
        element
            .0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
        self.state
            .borrow_mut()
            .log(format!("style {element:?} {property}={value}"));
    }

    fn remove_attribute(&self, element: &FakeElement, name: &str) {
        element.0.borrow_mut().attributes.remove(name);
    }

    fn append_child(&self, parent: &FakeElement, child: &FakeElement) -> Result<(), DomError> {
        if parent == child {
            return Err(DomError("cannot append an element to itself".into()));
        }
        self.detach_quietly(child);
        child.0.borrow_mut().parent = Some(Rc::downgrade(&parent.0));
        parent.0.borrow_mut().children.push(child.clone());
        self.state
            .borrow_mut()
            .log(format!("append {parent:?} {child:?}"));
        Ok(())
    }

    fn attach(&self, element: &FakeElement) -> Result<(), DomError> {
        let body = self.body();
        self.detach_quietly(element);
        element.0.borrow_mut().parent = Some(Rc::downgrade(&body.0));
        body.0.borrow_mut().children.push(element.clone());
        self.state
            .borrow_mut()
            .log(format!("attach {element:?}"));
        Ok(())
    }

    fn detach(&self, element: &FakeElement) -> bool {
        let detached = self.detach_quietly(element);
        if detached {
            self.state
                .borrow_mut()
                .log(format!("detach {element:?}"));
        }
        detached
    }

    fn clone_matching(&self, selector: &str) -> Option<FakeElement> {
        let state = self.state.borrow();
        state
            .page
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, element)| element.deep_clone())
    }

    /// Each non-empty line of `html` becomes one child element.
    fn insert_html(&self, element: &FakeElement, html: &str) -> Result<(), DomError> {
        for line in html.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let child = FakeElement::new();
            child.0.borrow_mut().html = line.to_string();
            child.0.borrow_mut().parent = Some(Rc::downgrade(&element.0));
            element.0.borrow_mut().children.push(child);
        }
        self.state
            .borrow_mut()
            .log(format!("html {element:?}"));
        Ok(())
    }

    fn first_element_child(&self, element: &FakeElement) -> Option<FakeElement> {
        element.children().into_iter().next()
    }

    fn transition_duration(&self, element: &FakeElement) -> String {
        if !self.state.borrow().report_transitions {
            return String::new();
        }
        element
            .style(TRANSITION_DURATION_PROPERTY)
            .unwrap_or_default()
    }

    fn transition_end(&self, element: &FakeElement) -> Completion {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.borrow_mut();
        state.transition_waiters.push((element.id(), tx));
        state.log(format!("transition-wait {element:?}"));
        Self::waiter(rx)
    }

    fn fade(&self, element: &FakeElement, from: f64, to: f64, duration_ms: i64) -> Completion {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.borrow_mut();
        state.fade_waiters.push((element.id(), tx));
        state.log(format!("fade {element:?} {from}->{to} {duration_ms}ms"));
        Self::waiter(rx)
    }

    fn on_key_down(&self, handler: Box<dyn Fn(&str)>) -> FakeListener {
        let (id, listener) = self.listener();
        self.state
            .borrow_mut()
            .key_handlers
            .push((id, Rc::from(handler)));
        listener
    }

    fn on_click(&self, element: &FakeElement, handler: Box<dyn Fn()>) -> FakeListener {
        let (id, listener) = self.listener();
        self.state
            .borrow_mut()
            .click_handlers
            .push((id, element.id(), Rc::from(handler)));
        listener
    }

    fn broadcast(&self, event_type: &str) {
        let mut state = self.state.borrow_mut();
        state.broadcasts.push(event_type.to_string());
        state.log(format!("broadcast {event_type}"));
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(task) {
            log::warn!("failed to spawn task: {e}");
        }
    }
}

impl FakeSurface {
    fn detach_quietly(&self, element: &FakeElement) -> bool {
        let Some(parent) = element.parent() else {
            return false;
        };
        parent.0.borrow_mut().children.retain(|c| c != element);
        element.0.borrow_mut().parent = None;
        true
    }
}

/// Canned responses keyed by url. Unknown urls fail at the network level.
#[derive(Clone, Default)]
pub struct FakeTransport {
    routes: Rc<RefCell<HashMap<String, Result<Response, FetchError>>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: &str, status: u16, status_text: &str, body: &str) {
        self.routes.borrow_mut().insert(
            url.to_string(),
            Ok(Response {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, url: &str, reason: &str) {
        self.routes
            .borrow_mut()
            .insert(url.to_string(), Err(FetchError::Network(reason.to_string())));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> LocalBoxFuture<'static, Result<Response, FetchError>> {
        self.requests.borrow_mut().push(url.to_string());
        let result = self
            .routes
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Network(format!("no route to {url}"))));
        futures::future::ready(result).boxed_local()
    }
}
