#[cfg(feature = "hydrate")]
pub mod bindings;

pub use component::custombox::Custombox;
pub use component::{
    Animation, Direction, Edge, LifecycleEvent, Modal, ModalError, Options, Phase, Settings,
};
pub use utils::{Hook, Subscription, Surface, Transport};

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("logger already initialised: {e}");
    }
}
