use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Optional user callback fired at a lifecycle transition.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn()>);

impl Hook {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Runs the callback. A panicking callback is logged and otherwise ignored
    /// where panics unwind; on `wasm32-unknown-unknown` panics abort, so a
    /// Rust callback must not panic there. Callbacks wrapping a JS function
    /// report a thrown exception as an `Err` instead and are always safe.
    pub fn call(&self, name: &str) {
        let f = &self.0;
        if catch_unwind(AssertUnwindSafe(|| f())).is_err() {
            log::warn!("{name} hook panicked, ignoring");
        }
    }
}

impl std::fmt::Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Hook(..)")
    }
}

impl<F: Fn() + 'static> From<F> for Hook {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn hook_runs_callback() {
        let hits = Rc::new(Cell::new(0));
        let hook = Hook::new({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        hook.call("open");
        hook.call("open");
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn panicking_hook_is_swallowed() {
        let hook = Hook::new(|| panic!("faulty hook"));
        hook.call("close");
    }
}
