pub mod emitter;
pub mod hook;
pub mod surface;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
#[cfg(feature = "hydrate")]
pub mod web;

pub use emitter::{Emitter, Subscription};
pub use hook::Hook;
pub use surface::{Completion, DomError, Surface};
pub use transport::{FetchError, Response, Transport};
