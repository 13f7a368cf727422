use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<dyn Fn(E)>;

struct Slots<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

/// Typed, single threaded event emitter.
///
/// Listeners stay registered for as long as the returned [`Subscription`]
/// is alive.
pub struct Emitter<E> {
    slots: Rc<RefCell<Slots<E>>>,
}

impl<E: Copy + 'static> Emitter<E> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(E) + 'static) -> Subscription {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.listeners.push((id, Rc::new(listener)));
            id
        };

        let slots: Weak<RefCell<Slots<E>>> = Rc::downgrade(&self.slots);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(slots) = slots.upgrade() {
                    slots.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    pub fn emit(&self, event: E) {
        // listeners may subscribe or unsubscribe while being notified
        let listeners: Vec<Listener<E>> = self
            .slots
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.slots.borrow().listeners.len()
    }
}

impl<E: Copy + 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn delivers_to_every_subscriber() {
        let emitter = Emitter::<u8>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _a = emitter.subscribe({
            let seen = seen.clone();
            move |e| seen.borrow_mut().push(("a", e))
        });
        let _b = emitter.subscribe({
            let seen = seen.clone();
            move |e| seen.borrow_mut().push(("b", e))
        });

        emitter.emit(7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let emitter = Emitter::<u8>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sub = emitter.subscribe({
            let seen = seen.clone();
            move |e| seen.borrow_mut().push(e)
        });
        emitter.emit(1);
        drop(sub);
        emitter.emit(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(emitter.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_emitter_is_harmless() {
        let emitter = Emitter::<u8>::new();
        let sub = emitter.subscribe(|_| {});
        drop(emitter);
        drop(sub);
    }
}
