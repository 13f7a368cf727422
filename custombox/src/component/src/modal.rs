use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use consts::{ESCAPE_KEYS, EVENT_NAMESPACE};
use futures::FutureExt;
use utils::{Emitter, Hook, Subscription, Surface, Transport};

use crate::config::{Options, Settings};
use crate::content::Content;
use crate::error::ModalError;
use crate::overlay::Overlay;
use crate::wrapper::Wrapper;
use crate::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The modal is on the page; animations may still be running.
    Open,
    /// The entrance animations finished.
    Complete,
    /// The modal has been torn down.
    Close,
}

impl LifecycleEvent {
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::Open => "open",
            LifecycleEvent::Complete => "complete",
            LifecycleEvent::Close => "close",
        }
    }

    /// Namespaced name used for the page wide broadcast, e.g. `custombox:open`.
    pub fn event_type(self) -> String {
        format!("{EVENT_NAMESPACE}:{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Constructed,
    Opening,
    Open,
    Closing,
    Closed,
}

struct ModalInner<S: Surface> {
    surface: S,
    settings: Settings,
    wrapper: Wrapper<S>,
    content: Content<S>,
    overlay: Option<Overlay<S>>,
    phase: Cell<Phase>,
    listeners: RefCell<Vec<S::Listener>>,
    events: Emitter<LifecycleEvent>,
}

/// One modal instance: built once, opened once, closed once.
///
/// Cheap to clone; clones share the same instance.
pub struct Modal<S: Surface> {
    inner: Rc<ModalInner<S>>,
}

impl<S: Surface> Clone for Modal<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Surface> Modal<S> {
    /// Builds the wrapper, content pane and (if enabled) overlay without
    /// touching the page.
    pub fn new(
        surface: S,
        transport: Rc<dyn Transport>,
        options: Options,
    ) -> Result<Self, ModalError> {
        let settings = Settings::merge(options);

        let wrapper = Wrapper::new(surface.clone(), &settings.effect, settings.fullscreen)?;
        let content = Content::new(
            surface.clone(),
            transport,
            settings.speed,
            &settings.effect,
            settings.animation,
        )?;
        let overlay = if settings.overlay {
            let overlay = Overlay::new(surface.clone(), &settings)?;
            surface.append_child(wrapper.element(), overlay.element())?;
            Some(overlay)
        } else {
            None
        };
        surface.append_child(wrapper.element(), content.element())?;

        Ok(Self {
            inner: Rc::new(ModalInner {
                surface,
                settings,
                wrapper,
                content,
                overlay,
                phase: Cell::new(Phase::Constructed),
                listeners: RefCell::new(Vec::new()),
                events: Emitter::new(),
            }),
        })
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    pub fn has_overlay(&self) -> bool {
        self.inner.overlay.is_some()
    }

    pub fn wrapper(&self) -> &S::Element {
        self.inner.wrapper.element()
    }

    pub fn content(&self) -> &S::Element {
        self.inner.content.element()
    }

    pub fn overlay(&self) -> Option<&S::Element> {
        self.inner.overlay.as_ref().map(Overlay::element)
    }

    /// Listens to this modal's lifecycle events until the subscription is dropped.
    pub fn subscribe(&self, listener: impl Fn(LifecycleEvent) + 'static) -> Subscription {
        self.inner.events.subscribe(listener)
    }

    /// Populates the content, puts the modal on the page and starts the
    /// entrance animations.
    ///
    /// Resolves once the modal is attached and `open` has been dispatched;
    /// `complete` follows when the animations finish. If the content cannot
    /// be populated nothing is attached and the modal may be opened again.
    pub async fn open(&self) -> Result<(), ModalError> {
        let inner = &self.inner;
        if inner.phase.get() != Phase::Constructed {
            return Err(ModalError::AlreadyOpened);
        }
        inner.phase.set(Phase::Opening);

        let settings = &inner.settings;
        if let Err(e) = inner
            .content
            .fetch(&settings.target, settings.width.as_deref())
            .await
        {
            log::warn!("failed to populate modal from {}: {e}", settings.target);
            inner.phase.set(Phase::Constructed);
            return Err(e);
        }

        if let Err(e) = inner.surface.attach(inner.wrapper.element()) {
            inner.phase.set(Phase::Constructed);
            return Err(e.into());
        }
        inner.phase.set(Phase::Open);

        match &inner.overlay {
            Some(overlay) => {
                let overlay_done = overlay.bind(Direction::Open);
                let this = self.clone();
                inner.surface.spawn(
                    async move {
                        overlay_done.await;
                        if this.phase() != Phase::Open {
                            return;
                        }
                        this.inner.content.bind(Direction::Open).await;
                        this.complete();
                    }
                    .boxed_local(),
                );
            }
            None => {
                let duration = inner.surface.transition_duration(inner.content.element());
                if duration.is_empty() {
                    log::debug!("content has no transition, complete will not be dispatched");
                } else {
                    let content_done = inner.content.bind(Direction::Open);
                    let this = self.clone();
                    inner.surface.spawn(
                        async move {
                            content_done.await;
                            this.complete();
                        }
                        .boxed_local(),
                    );
                }
            }
        }

        self.dispatch(LifecycleEvent::Open);
        self.listen();
        Ok(())
    }

    /// Runs the exit animations and removes the modal from the page.
    ///
    /// Only an open modal can be closed; anything else is ignored.
    pub async fn close(&self) {
        let inner = &self.inner;
        if inner.phase.get() != Phase::Open {
            log::debug!("ignoring close while {:?}", inner.phase.get());
            return;
        }
        inner.phase.set(Phase::Closing);
        inner.listeners.borrow_mut().clear();

        match &inner.overlay {
            Some(overlay) => {
                let content_done = inner.content.bind(Direction::Close);
                let overlay_done = overlay.bind(Direction::Close);
                futures::join!(content_done, overlay_done);
                inner.content.remove();
                overlay.remove();
            }
            None => {
                inner.content.bind(Direction::Close).await;
                inner.content.remove();
            }
        }
        inner.wrapper.remove();

        inner.phase.set(Phase::Closed);
        self.dispatch(LifecycleEvent::Close);
    }

    /// [`Modal::open`] on a task of its own; failures are logged.
    pub fn open_detached(&self) {
        let this = self.clone();
        self.inner.surface.spawn(
            async move {
                if let Err(e) = this.open().await {
                    log::error!("failed to open modal: {e}");
                }
            }
            .boxed_local(),
        );
    }

    /// [`Modal::close`] on a task of its own.
    pub fn close_detached(&self) {
        let this = self.clone();
        self.inner
            .surface
            .spawn(async move { this.close().await }.boxed_local());
    }

    /// A close started during the entrance supersedes `complete`.
    fn complete(&self) {
        if self.phase() == Phase::Open {
            self.dispatch(LifecycleEvent::Complete);
        }
    }

    fn dispatch(&self, event: LifecycleEvent) {
        log::debug!("modal {}", event.name());
        let inner = &self.inner;
        inner.surface.broadcast(&event.event_type());
        inner.events.emit(event);
        if let Some(hook) = self.hook(event) {
            hook.call(event.name());
        }
    }

    fn hook(&self, event: LifecycleEvent) -> Option<&Hook> {
        let hooks = &self.inner.settings.hooks;
        match event {
            LifecycleEvent::Open => hooks.open.as_ref(),
            LifecycleEvent::Complete => hooks.complete.as_ref(),
            LifecycleEvent::Close => hooks.close.as_ref(),
        }
    }

    fn listen(&self) {
        let inner = &self.inner;
        let mut listeners = inner.listeners.borrow_mut();

        let weak = Rc::downgrade(inner);
        listeners.push(inner.surface.on_key_down(Box::new(move |key| {
            if ESCAPE_KEYS.iter().any(|k| *k == key) {
                close_weak(&weak);
            }
        })));

        if inner.settings.overlay_close {
            if let Some(overlay) = &inner.overlay {
                let weak = Rc::downgrade(inner);
                listeners.push(
                    inner
                        .surface
                        .on_click(overlay.element(), Box::new(move || close_weak(&weak))),
                );
            }
        }
    }
}

fn close_weak<S: Surface>(weak: &Weak<ModalInner<S>>) {
    if let Some(inner) = weak.upgrade() {
        Modal { inner }.close_detached();
    }
}
