use utils::{Subscription, Surface};

use crate::error::ModalError;
use crate::modal::{LifecycleEvent, Modal};

/// At most one modal, built on demand and driven by a visibility flag.
pub struct ModalToggle<S: Surface> {
    active: Option<(Modal<S>, Subscription)>,
}

impl<S: Surface> Default for ModalToggle<S> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<S: Surface> ModalToggle<S> {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Applies a new visibility.
    ///
    /// Showing with no active modal builds one and opens it; `on_close` runs
    /// if that modal later closes itself. Hiding closes and forgets the
    /// active modal.
    pub fn set(
        &mut self,
        show: bool,
        build: impl FnOnce() -> Result<Modal<S>, ModalError>,
        on_close: impl Fn() + 'static,
    ) -> Result<(), ModalError> {
        if !show {
            if let Some((modal, _sub)) = self.active.take() {
                modal.close_detached();
            }
            return Ok(());
        }
        if self.active.is_some() {
            return Ok(());
        }

        let modal = build()?;
        let sub = modal.subscribe(move |event| {
            if event == LifecycleEvent::Close {
                on_close();
            }
        });
        modal.open_detached();
        self.active = Some((modal, sub));
        Ok(())
    }
}
